use anyhow::Result;
use vizij_cube_core::{
    AxisRange, CubeConfig, CubeSession, GridInterpolator, InterpolationCube, PointWidgetConfig,
    PoseGrid, SliderWidgetConfig, Value, VecGridSource,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn load(name: &str) -> Result<PoseGrid> {
    vizij_test_fixtures::grids::load(name)
}

#[test]
fn fixture_grids_parse_with_shared_domain() -> Result<()> {
    for name in ["face-neutral", "face-smile", "face-wide"] {
        let grid = load(name)?;
        assert_eq!(grid.name(), name);
        assert_eq!(grid.u_range(), AxisRange::new(0.0, 1.0));
        assert_eq!(grid.v_range(), AxisRange::new(0.0, 1.0));
        assert_eq!(grid.v_values(), [0.0f32, 0.5, 1.0].as_slice());
    }
    Ok(())
}

#[test]
fn grid_json_round_trips_through_serde() -> Result<()> {
    let grid = load("face-smile")?;
    let json = serde_json::to_string(&grid)?;
    let back: PoseGrid = serde_json::from_str(&json)?;
    assert_eq!(back, grid);
    Ok(())
}

#[test]
fn malformed_grid_json_is_rejected() {
    let json = r#"{"name":"bad","u":[0.0,1.0],"v":[0.0],"samples":[[{}]]}"#;
    let err = serde_json::from_str::<PoseGrid>(json).expect_err("row count mismatch");
    assert!(err.to_string().contains("sample rows"), "{err}");
}

#[test]
fn quaternion_channel_stays_unit_length_inside_cells() -> Result<()> {
    let cube = InterpolationCube::new(
        vec![load("face-neutral")?, load("face-wide")?],
        &CubeConfig::default(),
    )?;
    for (u, v, w) in [(0.3, 0.2, 0.1), (0.9, 0.7, 0.6), (0.5, 0.5, 0.5)] {
        let pose = cube.evaluate(u, v, w);
        match pose.get("head.rotation") {
            Some(Value::Quat(q)) => {
                let len = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt();
                approx(len, 1.0, 1e-5);
            }
            other => panic!("expected quat, got {other:?}"),
        }
        assert!(matches!(pose.get("eyes.closed"), Some(Value::Bool(_))));
    }
    Ok(())
}

#[test]
fn widget_layouts_follow_cube_domain() -> Result<()> {
    let mut source = VecGridSource::new()
        .with_grid("a", load("face-neutral")?)
        .with_grid("b", load("face-smile")?);
    let ui = vizij_cube_core::CubeUiData::new(
        vec!["a".into(), "b".into()],
        vizij_cube_core::PreferredLocation::Scene,
    );
    let session = CubeSession::open(&mut source, ui, &CubeConfig::default())?;

    let point = session.point_layout(&PointWidgetConfig {
        size: 2.0,
        ..Default::default()
    })?;
    assert_eq!(point.x_range, AxisRange::new(0.0, 1.0));
    assert_eq!(point.x_values, vec![0.0, 0.5, 1.0]);
    assert_eq!(point.y_values, vec![0.0, 1.0]);
    assert_eq!(point.label_pos, [0.5, 21.0]);

    let slider = session.slider_layout(&SliderWidgetConfig::default())?;
    assert_eq!(slider.position, [1.5, -1.5]);
    assert_eq!(slider.length, 3.0);
    assert!(!slider.horizontal);
    assert_eq!(slider.radius, 7.5);
    Ok(())
}
