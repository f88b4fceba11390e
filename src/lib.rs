//! A parser for Quake/Valve-style `.cfg` files.
//!
//! quackit provides:
//!
//! - **Scanner**: Single-pass tokenizer for words, quoted strings, and comments
//! - **Quackit**: Engine dispatching each parsed command to registered handlers
//! - **Queued content**: Handlers (like `exec`) can schedule more text to parse
//! - **QuackitPlugin**: Bevy integration driven by messages
//!
//! # Features
//!
//! - `persist`: RON config files and a file-backed `exec` command
//! - `terminal`: stdin reader and the `quackit` binary
//! - `full`: Enable persist + terminal
//!
//! # Quick Start
//!
//! ```
//! use quackit::Quackit;
//!
//! let mut quackit = Quackit::new();
//! quackit.register_handler("bind", |_, args| {
//!     println!("bind {} -> {}", args.get_or(0, "?"), args.get_or(1, "?"));
//!     Ok(())
//! }).unwrap();
//!
//! quackit.parse(r#"
//!     // movement
//!     bind w "+forward"
//!     bind g "impulse 2; +attack"; sv_cheats 1
//! "#).unwrap();
//!
//! assert_eq!(quackit.parsed_commands().len(), 3);
//! ```

use std::mem;

use bevy::prelude::*;

// Core module (always available, zero optional deps)
pub mod core;
pub mod config;

// Re-export core types at crate root for convenience
pub use core::{
    Token, TokenKind,
    Command, CommandArgs, Position,
    Scanner, scan,
    HandlerRegistry, CommandHandler, HandlerError, RegistryError,
    Quackit, ParseError,
    CfgInputEvent, CfgCommandEvent, CfgErrorEvent, QuackitEventsPlugin,
};
pub use config::QuackitConfig;

// Persistence module (feature-gated)
#[cfg(feature = "persist")]
pub mod persist;

// Terminal backend (feature-gated)
#[cfg(feature = "terminal")]
pub mod terminal;

#[cfg(feature = "persist")]
pub use persist::{register_exec, ConfigError, ExecError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::core::{
        Token, TokenKind, Command, CommandArgs, Position,
        Quackit, ParseError, RegistryError,
        CfgInputEvent, CfgCommandEvent, CfgErrorEvent,
    };
    pub use crate::config::QuackitConfig;
    pub use crate::QuackitPlugin;
}

/// Bevy plugin exposing a [`Quackit`] resource driven by messages.
///
/// Send [`CfgInputEvent`]s with `.cfg` text; every parsed command comes back
/// as a [`CfgCommandEvent`] and every failed parse as a [`CfgErrorEvent`].
/// Handlers are registered on the resource, usually from a startup system.
///
/// # Configuration
///
/// ```ignore
/// App::new()
///     .add_plugins(MinimalPlugins)
///     .add_plugins(QuackitPlugin::with_config(QuackitConfig::new().exec_root("cfg")))
///     .add_systems(Startup, |mut quackit: ResMut<Quackit>| {
///         quackit.register_handler("sv_cheats", |_, args| {
///             info!("cheats = {}", args.get_or(0, "0"));
///             Ok(())
///         }).unwrap();
///     })
///     .run();
/// ```
#[derive(Default)]
pub struct QuackitPlugin {
    /// Configuration for the parser resource.
    pub config: QuackitConfig,
}

impl QuackitPlugin {
    /// Create the plugin with a custom parser configuration.
    pub fn with_config(config: QuackitConfig) -> Self {
        Self { config }
    }
}

impl Plugin for QuackitPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Quackit::with_config(self.config.clone()))
            .init_resource::<PendingCfg>()
            .add_plugins(core::QuackitEventsPlugin);

        // Persistence (feature-gated)
        #[cfg(feature = "persist")]
        app.add_systems(Startup, register_persist_handlers);

        // Process cfg input (three-stage pipeline)
        // 1. collect_cfg_input: Read input messages into the pending queue
        // 2. parse_pending_cfg: Parse each pending text with the parser resource
        // 3. send_pending_outputs: Write command and error messages
        app.add_systems(Update, (
            collect_cfg_input,
            parse_pending_cfg,
            send_pending_outputs,
        ).chain());
    }
}

/// Register persistence-related handlers.
#[cfg(feature = "persist")]
fn register_persist_handlers(mut quackit: ResMut<Quackit>) {
    if let Err(e) = persist::register_exec(&mut quackit) {
        warn!("Quackit: keeping existing exec handler: {}", e);
    }
}

/// Resource that holds cfg text waiting to be parsed and the results waiting to be sent.
#[derive(Resource, Default)]
struct PendingCfg {
    texts: Vec<String>,
    commands: Vec<CfgCommandEvent>,
    errors: Vec<CfgErrorEvent>,
}

/// System that moves input messages into the pending queue.
fn collect_cfg_input(
    mut input_events: MessageReader<CfgInputEvent>,
    mut pending: ResMut<PendingCfg>,
) {
    for event in input_events.read() {
        pending.texts.push(event.text.clone());
    }
}

/// System that parses pending text, one parse per submitted input.
fn parse_pending_cfg(mut quackit: ResMut<Quackit>, mut pending: ResMut<PendingCfg>) {
    let texts = mem::take(&mut pending.texts);

    for text in texts {
        match quackit.parse(&text) {
            Ok(()) => {
                let commands = quackit.parsed_commands().iter().cloned().map(CfgCommandEvent::new);
                pending.commands.extend(commands);
            }
            Err(e) => {
                warn!("Quackit: {}", e);
                pending.errors.push(CfgErrorEvent::from(&e));
            }
        }
    }
}

/// System that sends queued output messages.
fn send_pending_outputs(
    mut pending: ResMut<PendingCfg>,
    mut command_events: MessageWriter<CfgCommandEvent>,
    mut error_events: MessageWriter<CfgErrorEvent>,
) {
    for command in pending.commands.drain(..) {
        command_events.write(command);
    }
    for error in pending.errors.drain(..) {
        error_events.write(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Test resource collecting what the pipeline sent out.
    #[derive(Resource, Default)]
    struct Received {
        commands: Vec<Command>,
        errors: Vec<String>,
    }

    fn record_outputs(
        mut command_events: MessageReader<CfgCommandEvent>,
        mut error_events: MessageReader<CfgErrorEvent>,
        mut received: ResMut<Received>,
    ) {
        for event in command_events.read() {
            received.commands.push(event.command.clone());
        }
        for event in error_events.read() {
            received.errors.push(event.message.clone());
        }
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(QuackitPlugin::default());
        app.init_resource::<Received>();
        app.add_systems(Update, record_outputs.after(send_pending_outputs));
        app
    }

    /// Helper to queue cfg text directly for testing.
    fn submit(app: &mut App, text: &str) {
        let mut pending = app.world_mut().resource_mut::<PendingCfg>();
        pending.texts.push(text.to_string());
    }

    #[test]
    fn test_parse_via_pending_queue() {
        let mut app = test_app();

        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        app.world_mut()
            .resource_mut::<Quackit>()
            .register_handler("sv_cheats", move |_, _| {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();

        submit(&mut app, "sv_cheats 0\nsv_cheats 1\nbind g \"impulse 2\"");
        app.update();

        assert_eq!(count.load(Ordering::SeqCst), 2);
        let quackit = app.world().resource::<Quackit>();
        assert_eq!(quackit.parsed_commands().len(), 3);

        let received = app.world().resource::<Received>();
        assert_eq!(received.commands.len(), 3);
        assert_eq!(received.commands[2].texts(), vec!["bind", "g", "impulse 2"]);
        assert!(received.errors.is_empty());

        let pending = app.world().resource::<PendingCfg>();
        assert!(pending.texts.is_empty());
        assert!(pending.commands.is_empty());
    }

    #[test]
    fn test_parse_via_input_message() {
        let mut app = test_app();
        app.add_systems(Startup, |mut events: MessageWriter<CfgInputEvent>| {
            events.write(CfgInputEvent::new("say hello\ngod"));
            events.write(CfgInputEvent::new("noclip"));
        });

        app.update();

        let received = app.world().resource::<Received>();
        let names: Vec<_> = received.commands.iter().filter_map(|c| c.name()).collect();
        assert_eq!(names, vec!["say", "god", "noclip"]);
    }

    #[test]
    fn test_queued_content_in_app() {
        let mut app = test_app();
        app.add_systems(Startup, |mut quackit: ResMut<Quackit>| {
            quackit
                .register_handler("alias_fly", |q, _| {
                    q.queue_content("sv_cheats 1\nnoclip");
                    Ok(())
                })
                .unwrap();
        });
        app.update();

        submit(&mut app, "alias_fly");
        app.update();

        let received = app.world().resource::<Received>();
        let names: Vec<_> = received.commands.iter().filter_map(|c| c.name()).collect();
        assert_eq!(names, vec!["alias_fly", "sv_cheats", "noclip"]);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let mut app = test_app();

        submit(&mut app, "say hi\n\"quoted\" head");
        submit(&mut app, "god");
        app.update();

        let received = app.world().resource::<Received>();
        assert_eq!(received.errors.len(), 1);
        assert!(received.errors[0].starts_with("malformed command at 2:1"));
        // A failed parse sends no commands; the next input is unaffected.
        let names: Vec<_> = received.commands.iter().filter_map(|c| c.name()).collect();
        assert_eq!(names, vec!["god"]);
    }

    #[test]
    fn test_plugin_config() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(QuackitPlugin::with_config(QuackitConfig::new().max_queue_depth(3)));

        let quackit = app.world().resource::<Quackit>();
        assert_eq!(quackit.config().max_queue_depth, 3);
    }

    #[cfg(feature = "persist")]
    #[test]
    fn test_plugin_registers_exec() {
        let mut app = test_app();
        app.update();

        let quackit = app.world().resource::<Quackit>();
        assert!(quackit.handlers().contains("exec"));
    }
}
