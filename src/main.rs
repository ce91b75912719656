use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use buoyant_graph::{LayoutConfig, LayoutPlugin};
use std::time::Duration;

fn main() -> AppExit {
    let mut app = App::new();

    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        ))),
    )
    .add_plugins(LogPlugin::default());

    // Optional first argument: path to a JSON layout config
    let config = match std::env::args().nth(1) {
        Some(path) => match LayoutConfig::from_path(&path) {
            Ok(config) => {
                info!("Loaded layout config from {}", path);
                config
            }
            Err(err) => {
                error!("Cannot load {}: {}", path, err);
                return AppExit::error();
            }
        },
        None => LayoutConfig::default(),
    };

    app.add_plugins(LayoutPlugin::new(config));

    app.run()
}
