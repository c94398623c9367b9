use super::helpers::{assert_mat_close, roundtrip, s11n_err, verify_roundtrip};
use anyhow::Result;
use gval_types::gin;
use gval_types::graph::{
    bind, ArgKind, GArg, GShape, MetaArg, MetaArgs, RcDesc, RunArg, RunArgP, RunArgs,
};
use gval_types::s11n::{Deser, S11nError, Ser};
use gval_types::types::{
    ArrayDesc, Mat, MatDesc, MatType, OpaqueDesc, OpaqueKind, OpaqueRef, Point, Point2f, Rect,
    Scalar, ScalarDesc, Size,
};

#[test]
fn garg_point_and_int() -> Result<()> {
    let args = vec![GArg::new(Point::new(42, 43)), GArg::new(42i32)];
    let out = roundtrip(&args)?;
    assert_eq!(out[0].get::<Point>()?, &Point::new(42, 43));
    assert_eq!(*out[1].get::<i32>()?, 42);
    assert_eq!(out[1].opaque_kind(), OpaqueKind::Int);
    Ok(())
}

#[test]
fn garg_obj_ref() -> Result<()> {
    let arg = GArg::obj_ref(RcDesc::new(3, GShape::GOpaque), OpaqueKind::Size);
    let out = roundtrip(&arg)?;
    assert_eq!(out.kind(), ArgKind::GObjRef);
    assert_eq!(out.opaque_kind(), OpaqueKind::Size);
    assert_eq!(out, arg);
    Ok(())
}

#[test]
fn run_arg_mat() -> Result<()> {
    let mat = Mat::eye(8, 8, MatType::F32C1)?;
    match roundtrip(&RunArg::Mat(mat.clone()))? {
        RunArg::Mat(out) => assert_mat_close(&mat, &out),
        etc => panic!("{etc:?}"),
    }
    Ok(())
}

#[test]
fn run_args_mat_scalar() -> Result<()> {
    let args = gin!(Mat::eye(3, 3, MatType::U8C1)?, Scalar::all(7.0));
    let out = RunArgs::deser_solo(&args.ser_solo()?)?;
    assert_eq!(out.len(), 2);
    assert!(matches!(out[0], RunArg::Mat(_)));
    assert_eq!(out[1], RunArg::Scalar(Scalar::all(7.0)));
    Ok(())
}

#[test]
fn run_args_opaque_and_array() -> Result<()> {
    let args = gin!(
        Point::new(1, 2),
        String::from("str"),
        vec![Rect::new(0, 0, 1, 1)],
        vec![true, false],
    );
    verify_roundtrip(&args)?;

    let kinds = args.iter().map(RunArg::opaque_kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            OpaqueKind::Point,
            OpaqueKind::String,
            OpaqueKind::Rect,
            OpaqueKind::Bool
        ]
    );
    Ok(())
}

#[test]
fn gin_opaque_kinds() {
    let args = gin!(
        true,
        1i32,
        1i64,
        1.0f64,
        1.0f32,
        1u64,
        String::new(),
        Point::default(),
        Point2f::default(),
        Size::default(),
        Rect::default(),
    );
    for (arg, kind) in args.iter().zip(&OpaqueKind::ALL[1..12]) {
        assert!(matches!(arg, RunArg::Opaque(_)), "{arg:?}");
        assert_eq!(arg.opaque_kind(), *kind);
    }
}

#[test]
fn gin_array_kinds() -> Result<()> {
    let args = gin!(
        vec![true],
        vec![1i32],
        vec![1i64],
        vec![1.0f64],
        vec![1.0f32],
        vec![1u64],
        vec![String::new()],
        vec![Point::default()],
        vec![Point2f::default()],
        vec![Size::default()],
        vec![Rect::default()],
        vec![Scalar::default()],
        vec![Mat::zeros(1, 1, MatType::U8C1)?],
    );
    for (arg, kind) in args.iter().zip(&OpaqueKind::ALL[1..]) {
        assert!(matches!(arg, RunArg::Vector(_)), "{arg:?}");
        assert_eq!(arg.opaque_kind(), *kind);
    }
    Ok(())
}

#[test]
fn bind_preserves_kinds() -> Result<()> {
    let mut outs = gin!(
        Mat::zeros(2, 2, MatType::U8C1)?,
        OpaqueRef::default(),
        vec![0i32; 0]
    );
    {
        let ptrs = bind(&mut outs);
        let kinds = ptrs.iter().map(RunArgP::opaque_kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![OpaqueKind::Mat, OpaqueKind::Unknown, OpaqueKind::Int]
        );

        for ptr in ptrs {
            match ptr {
                RunArgP::Mat(m) => m.set(1, 1, 0, 200.0),
                RunArgP::Opaque(r) => {
                    r.reset::<Size>();
                    r.wref::<Size>()?.height = 5;
                }
                RunArgP::Vector(r) => r.wref::<i32>()?.extend([1, 2, 3]),
                RunArgP::Scalar(_) => panic!("no scalar bound"),
            }
        }
    }

    let out = RunArgs::deser_solo(&outs.ser_solo()?)?;
    match &out[0] {
        RunArg::Mat(m) => assert_eq!(m.at(1, 1, 0), 200.0),
        etc => panic!("{etc:?}"),
    }
    assert_eq!(out[1], RunArg::Opaque(OpaqueRef::new(Size::new(0, 5))));
    match &out[2] {
        RunArg::Vector(r) => assert_eq!(r.rref::<i32>()?, &vec![1, 2, 3]),
        etc => panic!("{etc:?}"),
    }
    Ok(())
}

#[test]
fn empty_opaque_run_arg_cannot_encode() {
    let err = RunArg::Opaque(OpaqueRef::default()).ser_solo().unwrap_err();
    assert!(matches!(
        s11n_err(&err),
        S11nError::UnsupportedKind {
            kind: OpaqueKind::Unknown,
            ..
        }
    ));
}

#[test]
fn meta_args() -> Result<()> {
    let mat = Mat::zeros(480, 640, MatType::U8C3)?;
    let metas: MetaArgs = vec![
        MetaArg::Empty,
        MetaArg::Mat(MatDesc::of(&mat)),
        MetaArg::Scalar(ScalarDesc),
        MetaArg::Array(ArrayDesc),
        MetaArg::Opaque(OpaqueDesc),
    ];
    verify_roundtrip(&metas)?;
    verify_roundtrip(&MetaArg::default())?;

    let derived = gin!(mat, vec![1.5f32])
        .iter()
        .map(MetaArg::descr_of)
        .collect::<MetaArgs>();
    assert_eq!(derived, vec![metas[1], metas[3]]);
    Ok(())
}

#[test]
fn meta_arg_bad_index() {
    let err = MetaArg::deser_solo(&[5, 0, 0, 0]).unwrap_err();
    assert!(matches!(
        s11n_err(&err),
        S11nError::BadVariantIndex { index: 5, .. }
    ));
}
