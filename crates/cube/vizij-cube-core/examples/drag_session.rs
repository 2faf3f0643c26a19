//! Drive a cube session from a scripted drag, printing the applied poses.
//!
//! Run with: cargo run -p vizij-cube-core --example drag_session

use vizij_cube_core::{
    ControlSurface, CubeConfig, CubeSession, CubeUiData, Pose, PoseApplier, PoseGrid,
    PreferredLocation, RedrawRequester, Value, VecGridSource,
};

struct ScriptedControls {
    point: [f32; 2],
    slider: f32,
}

impl ControlSurface for ScriptedControls {
    fn current_point(&self) -> [f32; 2] {
        self.point
    }
    fn current_slider(&self) -> f32 {
        self.slider
    }
}

struct PrintScene;

impl PoseApplier for PrintScene {
    fn apply_pose(&mut self, pose: &Pose, time: f32) {
        let line: Vec<String> = pose
            .channel_names()
            .into_iter()
            .filter_map(|name| pose.get(name).map(|v| format!("{name}={v:?}")))
            .collect();
        println!("frame {time:>4}: {}", line.join(", "));
    }
}

struct NoRedraw;

impl RedrawRequester for NoRedraw {
    fn request_redraw(&mut self) {}
}

fn flat_grid(name: &str, jaw: [f32; 4]) -> PoseGrid {
    let p = |x: f32| Pose::new().with("jaw.open", Value::Float(x));
    PoseGrid::new(
        name,
        vec![0.0, 1.0],
        vec![0.0, 1.0],
        vec![vec![p(jaw[0]), p(jaw[1])], vec![p(jaw[2]), p(jaw[3])]],
    )
    .expect("valid grid")
}

fn main() {
    let mut source = VecGridSource::new()
        .with_grid("low", flat_grid("low", [0.0, 0.1, 0.2, 0.3]))
        .with_grid("high", flat_grid("high", [1.0, 1.1, 1.2, 1.3]));
    let ui = CubeUiData::new(vec!["low".into(), "high".into()], PreferredLocation::Scene);

    let session = match CubeSession::open(&mut source, ui, &CubeConfig::default()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("cannot open cube: {e}");
            return;
        }
    };

    let mut controls = ScriptedControls {
        point: [0.0, 0.0],
        slider: 0.0,
    };
    let mut scene = PrintScene;
    let mut redraw = NoRedraw;

    for frame in 0..5 {
        let t = frame as f32 / 4.0;
        controls.point = [t, t];
        session.on_point_changed(controls.point, &controls, &mut scene, &mut redraw, frame as f32);
    }
    for frame in 5..10 {
        controls.slider = (frame - 5) as f32 * 25.0;
        session.on_slider_changed(controls.slider, &controls, &mut scene, &mut redraw, frame as f32);
    }
}
