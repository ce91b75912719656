use crate::config::LayoutConfig;
use crate::physics::{NodePhysics, integrate_all};
use crate::simulation::Simulation;
use bevy::prelude::*;

/// Runs a layout inside a Bevy app: generates it at startup, then ticks,
/// integrates and periodically logs it every frame
pub struct LayoutPlugin {
    pub config: LayoutConfig,
    /// Seconds between stats log lines
    pub stats_interval: f32,
}

impl LayoutPlugin {
    pub fn new(config: LayoutConfig) -> Self {
        LayoutPlugin {
            config,
            stats_interval: 2.0,
        }
    }
}

impl Plugin for LayoutPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(LayoutSettings(self.config))
            .insert_resource(StatsTimer(Timer::from_seconds(
                self.stats_interval,
                TimerMode::Repeating,
            )))
            .add_systems(Startup, setup_layout)
            .add_systems(
                Update,
                (tick_layout, integrate_bodies, log_layout_stats).chain(),
            );
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct LayoutSettings(pub LayoutConfig);

/// The live simulation; absent if generation failed
#[derive(Resource, Debug)]
pub struct LayoutSimulation(pub Simulation<NodePhysics>);

#[derive(Resource, Debug)]
struct StatsTimer(Timer);

fn setup_layout(
    mut commands: Commands,
    settings: Res<LayoutSettings>,
    mut exit: MessageWriter<AppExit>,
) {
    match Simulation::generate(&settings.0, NodePhysics::at) {
        Ok(simulation) => {
            let stats = simulation.stats();
            info!(
                "Layout ready: {} vertices, {} edges",
                stats.vertices, stats.edges
            );
            commands.insert_resource(LayoutSimulation(simulation));
        }
        Err(err) => {
            error!("Failed to generate layout: {}", err);
            exit.write(AppExit::error());
        }
    }
}

fn tick_layout(time: Res<Time>, layout: Option<ResMut<LayoutSimulation>>) {
    let Some(mut layout) = layout else {
        return;
    };
    layout.0.tick(time.delta_secs());
}

fn integrate_bodies(time: Res<Time>, layout: Option<ResMut<LayoutSimulation>>) {
    let Some(mut layout) = layout else {
        return;
    };
    integrate_all(layout.0.bodies_mut(), time.delta_secs());
}

fn log_layout_stats(
    time: Res<Time>,
    mut timer: ResMut<StatsTimer>,
    layout: Option<Res<LayoutSimulation>>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    let Some(layout) = layout else {
        return;
    };

    let stats = layout.0.stats();
    info!(
        "tick {}: height error mean {:.3} / max {:.3}, {} of {} edges stretched",
        layout.0.ticks(),
        stats.mean_height_error,
        stats.max_height_error,
        stats.stretched_edges,
        stats.edges
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;

    fn app_with(config: LayoutConfig) -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .add_plugins(LayoutPlugin::new(config));
        app
    }

    #[test]
    fn test_startup_generates_and_ticks() {
        let config = LayoutConfig {
            graph: GraphConfig {
                vertex_count: 6,
                acyclic: true,
                ..GraphConfig::default()
            },
            seed: Some(10),
            ..LayoutConfig::default()
        };
        let mut app = app_with(config);
        app.update();

        let layout = app.world().resource::<LayoutSimulation>();
        assert_eq!(layout.0.graph().vertex_count(), 6);
        assert_eq!(layout.0.graph().edge_count(), 5);
        assert_eq!(layout.0.ticks(), 1);
    }

    #[test]
    fn test_bad_config_requests_exit() {
        let config = LayoutConfig {
            graph: GraphConfig {
                vertex_count: 0,
                ..GraphConfig::default()
            },
            ..LayoutConfig::default()
        };
        let mut app = app_with(config);
        app.update();

        assert!(app.world().get_resource::<LayoutSimulation>().is_none());
        assert!(app.should_exit().is_some());
    }
}
