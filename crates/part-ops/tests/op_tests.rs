use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use approx::assert_relative_eq;
use nalgebra::Point3;

use part_ops::knurl::knurled_head_dims;
use part_ops::{
    hex_head3d, knurl3d, knurled_head3d, nut, nut_with, threaded_cylinder, HeadStyle, HexRound,
    KnurlParms, NutParms, Proportions, SynthesisError, ThreadMode, ThreadedCylinderParms,
    TruncRectPyramidParms,
};
use sdf_kernel::{Kernel, KernelOp, RecordingKernel, SdfKernel, StandardThreads, ThreadTable};

fn valid_knurl() -> KnurlParms {
    KnurlParms {
        length: 20.0,
        radius: 6.0,
        pitch: 1.5708,
        height: 0.47,
        theta: 0.785,
    }
}

// ── Knurl Tests ────────────────────────────────────────────────────────────

#[test]
fn knurl_rejects_each_bad_field() {
    let cases = [
        (KnurlParms { length: 0.0, ..valid_knurl() }, "length"),
        (KnurlParms { radius: -1.0, ..valid_knurl() }, "radius"),
        (KnurlParms { pitch: 0.0, ..valid_knurl() }, "pitch"),
        (KnurlParms { height: -1.0, ..valid_knurl() }, "height"),
        (KnurlParms { theta: -0.1, ..valid_knurl() }, "theta"),
        (KnurlParms { theta: FRAC_PI_2, ..valid_knurl() }, "theta"),
    ];
    for (parms, field) in cases {
        let mut kernel = RecordingKernel::new();
        let err = knurl3d(&mut kernel, &parms).unwrap_err();
        assert!(
            matches!(err, SynthesisError::Validation { field: f, .. } if f == field),
            "{parms:?} gave {err}"
        );
        assert!(kernel.ops().is_empty(), "validation must precede kernel calls");
    }
}

#[test]
fn knurl_crosses_opposite_handed_screws() {
    let mut kernel = RecordingKernel::new();
    knurl3d(&mut kernel, &valid_knurl()).unwrap();
    let n = part_ops::knurl_starts(6.0, 1.5708, 0.785);
    assert!(n > 0);
    let screws: Vec<i32> = kernel
        .ops()
        .iter()
        .filter_map(|op| match op {
            KernelOp::Screw3d { starts, .. } => Some(*starts),
            _ => None,
        })
        .collect();
    assert_eq!(screws, vec![n, -n]);
    assert_eq!(kernel.ops().last(), Some(&KernelOp::Intersect3d { operands: 2 }));
}

#[test]
fn knurl_with_zero_helix_angle_is_ringed() {
    let parms = KnurlParms { theta: 0.0, ..valid_knurl() };
    let mut recorder = RecordingKernel::new();
    knurl3d(&mut recorder, &parms).unwrap();
    assert_eq!(recorder.count("screw3d"), 2);
    assert!(recorder
        .ops()
        .iter()
        .all(|op| !matches!(op, KernelOp::Screw3d { starts, .. } if *starts != 0)));

    let mut kernel = SdfKernel::new();
    let solid = knurl3d(&mut kernel, &parms).unwrap();
    assert_relative_eq!(solid.bounding_box().max.x, 6.47, epsilon = 1e-12);
    // crest at z = 0, valley half a pitch away
    assert!(solid.evaluate(&Point3::new(6.3, 0.0, 0.0)) < 0.0);
    assert!(solid.evaluate(&Point3::new(6.3, 0.0, 0.7)) > 0.0);
    // no helix: every angle sees the same ring
    let d = solid.evaluate(&Point3::new(6.2, 0.0, 0.3));
    for a in [0.4_f64, 1.3, 2.9, -2.0] {
        let p = Point3::new(6.2 * a.cos(), 6.2 * a.sin(), 0.3);
        assert_relative_eq!(solid.evaluate(&p), d, epsilon = 1e-9);
    }
}

#[test]
fn knurl_start_count_at_45_degrees() {
    // floor(2π) when radius == pitch and tan(theta) == 1
    assert_eq!(part_ops::knurl_starts(1.0, 1.0, FRAC_PI_4), 6);
    assert_eq!(part_ops::knurl_starts(6.0, 1.0, 0.0), 0);
}

#[test]
fn knurled_head_dims_whole_pitches() {
    let dims = knurled_head_dims(10.0, 8.0, 1.5, &Proportions::default()).unwrap();
    assert_relative_eq!(dims.cylinder_round, 0.5);
    // floor((8 - 0.5) / 1.5) = 5 pitches
    assert_relative_eq!(dims.knurl_length, 7.5);
    assert_relative_eq!(dims.knurl_height, 0.45, epsilon = 1e-12);
    assert_relative_eq!(dims.theta, FRAC_PI_4);
}

#[test]
fn knurled_head_too_short_for_one_pitch() {
    let mut kernel = RecordingKernel::new();
    let err = knurled_head3d(&mut kernel, 10.0, 1.0, 2.0).unwrap_err();
    assert_eq!(err.field(), Some("height"));
    assert!(kernel.ops().is_empty());
}

#[test]
fn knurled_head_rejects_bad_edge_round() {
    for head_round in [-0.1, 1.5, f64::NAN] {
        let proportions = Proportions { head_round, ..Proportions::default() };
        let err = knurled_head_dims(8.0, 6.0, 1.0, &proportions).unwrap_err();
        assert_eq!(err.field(), Some("head_round"), "{head_round}");

        let mut kernel = RecordingKernel::new();
        let err = part_ops::knurled_head3d_with(&mut kernel, 8.0, 6.0, 1.0, &proportions).unwrap_err();
        assert_eq!(err.field(), Some("head_round"));
        assert!(kernel.ops().is_empty());
    }
}

#[test]
fn knurled_head_keeps_full_height() {
    let mut kernel = SdfKernel::new();
    let head = knurled_head3d(&mut kernel, 10.0, 8.0, 1.5).unwrap();
    let bb = head.bounding_box();
    assert_relative_eq!(bb.max.z, 4.0);
    assert_relative_eq!(bb.min.z, -4.0);
    // knurl ridges stand proud of the cylinder
    assert_relative_eq!(bb.max.x, 10.45, epsilon = 1e-9);
    assert!(head.evaluate(&Point3::new(0.0, 0.0, 0.0)) < 0.0);
}

// ── Nut Tests ──────────────────────────────────────────────────────────────

#[test]
fn nut_styles_share_hex_height() {
    let threads = StandardThreads::new();
    let m6 = threads.lookup("M6").unwrap();
    let mut kernel = SdfKernel::new();
    for style in ["hex", "knurl"] {
        let parms = NutParms::parse("M6", style, 0.1).unwrap();
        let solid = nut(&mut kernel, &threads, &parms).unwrap();
        let bb = solid.bounding_box();
        assert_relative_eq!(bb.size().z, m6.hex_height, epsilon = 1e-9);
    }
}

#[test]
fn nut_bore_is_open() {
    let threads = StandardThreads::new();
    let mut kernel = SdfKernel::new();
    let parms = NutParms::parse("M6", "hex", 0.0).unwrap();
    let solid = nut(&mut kernel, &threads, &parms).unwrap();
    assert!(solid.evaluate(&Point3::new(1.0, 0.0, 0.0)) > 0.0);
    assert!(solid.evaluate(&Point3::new(4.5, 0.0, 0.0)) < 0.0);
}

#[test]
fn nut_unknown_style() {
    let err = NutParms::parse("M6", "round", 0.0).unwrap_err();
    assert_eq!(
        err,
        SynthesisError::UnknownStyle {
            style: "round".into()
        }
    );
}

#[test]
fn nut_with_custom_knurl_pitch() {
    let threads = StandardThreads::new();
    let mut kernel = RecordingKernel::new();
    let proportions = Proportions {
        nut_knurl_pitch: 0.5,
        ..Proportions::default()
    };
    let parms = NutParms::parse("M10", "knurl", 0.0).unwrap();
    nut_with(&mut kernel, &threads, &parms, &proportions).unwrap();
    let m10 = threads.lookup("M10").unwrap();
    assert!(kernel.ops().iter().any(|op| matches!(
        op,
        KernelOp::Screw3d { pitch, .. } if (*pitch - 0.5 * m10.hex_radius).abs() < 1e-12
    )));
}

// ── Parameter Record Tests ─────────────────────────────────────────────────

#[test]
fn nut_parms_from_json() {
    let parms: NutParms =
        serde_json::from_str(r#"{"thread": "M8", "style": "knurl", "tolerance": 0.2}"#).unwrap();
    assert_eq!(parms.style, HeadStyle::Knurl);
    let text = serde_json::to_string(&parms).unwrap();
    assert!(text.contains(r#""style":"knurl""#));
}

#[test]
fn nut_parms_json_rejects_unknown_style() {
    let err = serde_json::from_str::<NutParms>(r#"{"thread": "M8", "style": "round", "tolerance": 0}"#)
        .unwrap_err();
    assert!(err.to_string().contains("unknown style: round"));
}

#[test]
fn pyramid_parms_from_json() {
    let parms: TruncRectPyramidParms = serde_json::from_str(
        r#"{"size": [40, 30, 10], "base_angle": 1.0, "base_radius": 2, "round_radius": 1}"#,
    )
    .unwrap();
    assert_eq!(parms.size.y, 30.0);
    assert!(parms.derive().is_ok());
}

#[test]
fn thread_mode_parsing() {
    assert_eq!("male".parse::<ThreadMode>().unwrap(), ThreadMode::Male);
    assert_eq!("female".parse::<ThreadMode>().unwrap(), ThreadMode::Female);
    assert!(matches!(
        "neuter".parse::<ThreadMode>(),
        Err(SynthesisError::UnknownStyle { .. })
    ));
    let parms: ThreadedCylinderParms = serde_json::from_str(
        r#"{"thread": "M6", "length": 10, "tolerance": 0.1, "mode": "female"}"#,
    )
    .unwrap();
    assert_eq!(parms.mode, ThreadMode::Female);
}

#[test]
fn proportions_partial_override() {
    let p: Proportions = serde_json::from_str(r#"{"knurl_height": 0.4}"#).unwrap();
    assert_eq!(p.knurl_height, 0.4);
    assert_eq!(p.hex_dome_radius, Proportions::default().hex_dome_radius);
}

// ── Supplementary Part Tests ───────────────────────────────────────────────

#[test]
fn threaded_male_top_is_chamfered() {
    let threads = StandardThreads::new();
    let mut kernel = SdfKernel::new();
    let parms = ThreadedCylinderParms {
        thread: "M10".into(),
        length: 12.0,
        tolerance: 0.0,
        mode: ThreadMode::Male,
    };
    let screw = threaded_cylinder(&mut kernel, &threads, &parms).unwrap();
    let bb = screw.bounding_box();
    assert_relative_eq!(bb.max.z, 6.0);
    // solid core, nothing left at the outer rim of the top face
    assert!(screw.evaluate(&Point3::new(1.0, 0.0, 5.9)) < 0.0);
    assert!(screw.evaluate(&Point3::new(bb.max.x - 0.05, 0.0, 5.95)) > 0.0);
}

#[test]
fn unknown_thread_for_threaded_cylinder() {
    let mut kernel = RecordingKernel::new();
    let parms = ThreadedCylinderParms {
        thread: "M7.5".into(),
        length: 12.0,
        tolerance: 0.0,
        mode: ThreadMode::Female,
    };
    let err = threaded_cylinder(&mut kernel, &StandardThreads::new(), &parms).unwrap_err();
    assert!(matches!(err, SynthesisError::UnknownThread { .. }));
}

#[test]
fn hex_head_generic_over_kernel() {
    let mut recording = RecordingKernel::wrap(SdfKernel::new());
    let head = hex_head3d(&mut recording, 4.0, 3.0, HexRound::Bottom).unwrap();
    assert_eq!(recording.count("translate3d"), 1);
    let kernel: &mut dyn Kernel = &mut recording;
    let again = hex_head3d(kernel, 4.0, 3.0, HexRound::Bottom).unwrap();
    assert_eq!(head.bounding_box(), again.bounding_box());
}
