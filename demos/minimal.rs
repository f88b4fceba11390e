//! Minimal headless example.
//!
//! Feeds `.cfg` text to the parser through messages and prints what comes back.
//!
//! Run with: `cargo run --example minimal`

use bevy::prelude::*;
use quackit::prelude::*;

fn main() {
    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(QuackitPlugin::default())
        .add_systems(Startup, setup)
        .add_systems(Update, process_outputs)
        .add_systems(Update, send_test_config.run_if(run_once))
        .run();
}

fn setup(mut quackit: ResMut<Quackit>) {
    let cheats = quackit.register_handler("sv_cheats", |_, args| {
        println!("sv_cheats is now {}", args.parse_or::<u8>(0, 0));
        Ok(())
    });

    // Aliases expand by queuing more text
    let alias = quackit.register_handler("alias_fly", |q, _| {
        q.queue_content("sv_cheats 1\nnoclip");
        Ok(())
    });

    for result in [cheats, alias] {
        if let Err(e) = result {
            warn!("{}", e);
        }
    }

    println!("Parser initialized. Registered: sv_cheats, alias_fly");
}

/// Send some test config text programmatically.
fn send_test_config(mut events: MessageWriter<CfgInputEvent>) {
    println!("\n--- Sending test config ---");

    events.write(CfgInputEvent::new("sv_cheats 0 // off by default"));
    events.write(CfgInputEvent::new("bind g \"impulse 2; +attack\"\nalias_fly"));

    // Fails: a command must start with a word
    events.write(CfgInputEvent::new("\"quoted\" head"));
}

/// Print parsed commands and parse errors.
fn process_outputs(
    mut commands: MessageReader<CfgCommandEvent>,
    mut errors: MessageReader<CfgErrorEvent>,
) {
    for event in commands.read() {
        println!("[$] {} {}", event.command.position(), event.command);
    }
    for event in errors.read() {
        println!("[ERROR] {}", event.message);
    }
}
