use bevy::{
    log::{Level, LogPlugin},
    prelude::*,
    window::{ExitCondition, PresentMode},
};
use clap::Parser;
use seascape_client::{ui::InspectorPlugin, SeascapePlugins};
use shared::{
    config::{get_scene_paths, load_or_create_config},
    pipeline::{FramePipeline, RenderPassKind},
    sun::SunParameters,
    SceneError,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, help = "Scene configuration file, defaults to <assets_folder_path>/seascape.ron")]
    config: Option<String>,

    #[arg(short, long, help = "Allows overriding of the asset folder path, defaults to ./assets")]
    assets_folder_path: Option<String>,

    #[arg(long, allow_hyphen_values = true, help = "Sun elevation in degrees")]
    elevation: Option<f32>,

    #[arg(long, allow_hyphen_values = true, help = "Sun azimuth in degrees")]
    azimuth: Option<f32>,

    #[arg(long, help = "Add the bloom pass")]
    bloom: bool,

    #[arg(long, help = "Add the SMAA pass (disables MSAA)")]
    smaa: bool,

    #[arg(long, help = "Hide the sun inspector window")]
    no_inspector: bool,
}

fn main() {
    let args = Args::parse();
    let paths = get_scene_paths(args.config, args.assets_folder_path);

    // Bevy resolves relative asset paths against the crate directory, the
    // config file against the working directory. Anchor both to the latter.
    let assets_folder = std::path::absolute(&paths.assets_folder_path)
        .unwrap_or_else(|_| paths.assets_folder_path.clone());

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(LogPlugin {
                level: Level::INFO,
                filter: "wgpu=error,naga=warn,seascape_client=debug".to_string(),
                ..default()
            })
            .set(AssetPlugin {
                file_path: assets_folder.to_string_lossy().into_owned(),
                ..default()
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Seascape".to_string(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                exit_condition: ExitCondition::OnPrimaryClosed,
                close_when_requested: true,
            }),
    );

    let mut config = load_or_create_config(&paths.config_path);
    if let Some(elevation) = args.elevation {
        config.sun.elevation_degrees = elevation;
    }
    if let Some(azimuth) = args.azimuth {
        config.sun.azimuth_degrees = azimuth;
    }
    if args.bloom {
        config.enable_pass(RenderPassKind::Bloom);
    }
    if args.smaa {
        config.enable_pass(RenderPassKind::Smaa);
    }

    let pipeline = config.frame_pipeline().unwrap_or_else(|e| {
        warn!(
            "{}: {:?}, using the scene pass only",
            SceneError::from(e),
            config.pipeline
        );
        FramePipeline::default()
    });
    let sun: SunParameters = config.sun.sanitized();
    if sun != config.sun {
        warn!("Sun parameters {:?} out of range, using {:?}", config.sun, sun);
    }
    let camera = config.camera.validated();
    if camera != config.camera {
        warn!("Camera settings {:?} unusable, using {:?}", config.camera, camera);
        config.camera = camera.clone();
    }

    app.insert_resource(sun)
        .insert_resource(camera)
        .insert_resource(pipeline)
        .insert_resource(paths)
        .insert_resource(config)
        .add_plugins(SeascapePlugins);

    if !args.no_inspector {
        app.add_plugins(InspectorPlugin);
    }

    app.run();
}
