use super::helpers::{assert_mat_close, roundtrip, s11n_err};
use anyhow::Result;
use gval_types::s11n::{ByteMemoryOutStream, Deser, S11nError, Ser};
use gval_types::types::{
    ArrayPayload, Mat, MatDesc, MatType, OpaqueKind, OpaquePayload, OpaqueRef, Point, Point2f,
    Rect, Scalar, Size, VectorRef,
};

/// Runs every accessor of `T` against `op`. Only `T`'s own kind may succeed;
/// any other request must fail with `KindMismatch`. Returns whether `T` matched.
fn opaque_access_succeeds<T: OpaquePayload>(op: &OpaqueRef) -> bool {
    let actual = op.kind();
    let matches = T::KIND == actual;

    let mut scratch = op.clone();
    let results = [
        op.rref::<T>().map(|_| ()),
        scratch.wref::<T>().map(|_| ()),
        op.clone().into_inner::<T>().map(|_| ()),
    ];
    for res in results {
        match res {
            Ok(()) => assert!(matches, "{:?} read out of {:?}", T::KIND, actual),
            Err(err) => {
                assert!(!matches, "{:?} refused by {:?}", T::KIND, actual);
                assert_eq!(
                    s11n_err(&err),
                    &S11nError::KindMismatch {
                        requested: T::KIND,
                        actual
                    }
                );
            }
        }
    }
    matches
}

fn vector_access_succeeds<T: ArrayPayload>(vr: &VectorRef) -> bool {
    let actual = vr.kind();
    let matches = T::KIND == actual;

    let mut scratch = vr.clone();
    let results = [
        vr.rref::<T>().map(|_| ()),
        scratch.wref::<T>().map(|_| ()),
        vr.clone().into_inner::<T>().map(|_| ()),
    ];
    for res in results {
        match res {
            Ok(()) => assert!(matches, "{:?} read out of {:?}", T::KIND, actual),
            Err(err) => {
                assert!(!matches, "{:?} refused by {:?}", T::KIND, actual);
                assert_eq!(
                    s11n_err(&err),
                    &S11nError::KindMismatch {
                        requested: T::KIND,
                        actual
                    }
                );
            }
        }
    }
    matches
}

/// How many of the listed payload types `$check` accepts for `$handle`.
macro_rules! count_accessors {
    ($check:ident, $handle:expr, $($t:ty),+ $(,)?) => {
        [$( $check::<$t>($handle) ),+]
            .into_iter()
            .filter(|ok| *ok)
            .count()
    };
}

#[test]
fn vector_of_doubles() -> Result<()> {
    let vr = VectorRef::new(vec![0.4f64, 1.0, 123.55, 22.08]);
    let out = roundtrip(&vr)?;
    assert_eq!(out.kind(), OpaqueKind::Double);
    assert_eq!(out.rref::<f64>()?, &vec![0.4, 1.0, 123.55, 22.08]);
    Ok(())
}

#[test]
fn vector_of_mats() -> Result<()> {
    let mats = vec![
        Mat::eye(5, 5, MatType::F32C1)?,
        Mat::new_with(2, 3, MatType::U8C3, Scalar::new(1.0, 2.0, 3.0, 0.0))?,
    ];
    let out = roundtrip(&VectorRef::new(mats.clone()))?;
    assert_eq!(out.kind(), OpaqueKind::Mat);
    for (e, a) in mats.iter().zip(out.rref::<Mat>()?) {
        assert_mat_close(e, a);
    }
    Ok(())
}

#[test]
fn vectors_of_geometry() -> Result<()> {
    let points = VectorRef::new(vec![Point::new(0, 0), Point::new(-1, 9)]);
    let rects = VectorRef::new(vec![Rect::new(1, 2, 3, 4)]);
    let sizes = VectorRef::new(vec![Size::new(640, 480), Size::new(1, 1)]);
    let floats = VectorRef::new(vec![Point2f::new(0.25, 0.5)]);
    for vr in [points, rects, sizes, floats] {
        assert_eq!(roundtrip(&vr)?, vr);
    }
    Ok(())
}

#[test]
fn opaque_kinds_survive() -> Result<()> {
    let handles = [
        OpaqueRef::new(true),
        OpaqueRef::new(-5i32),
        OpaqueRef::new(1i64 << 40),
        OpaqueRef::new(0.125f64),
        OpaqueRef::new(0.5f32),
        OpaqueRef::new(u64::MAX),
        OpaqueRef::new(String::from("opaque")),
        OpaqueRef::new(Point::new(1, 2)),
        OpaqueRef::new(Point2f::new(1.0, 2.0)),
        OpaqueRef::new(Size::new(3, 4)),
        OpaqueRef::new(Rect::new(5, 6, 7, 8)),
    ];
    for (op, kind) in handles.iter().zip(&OpaqueKind::ALL[1..12]) {
        let out = roundtrip(op)?;
        assert_eq!(out.kind(), *kind);
        assert_eq!(&out, op);
    }
    Ok(())
}

#[test]
fn mismatched_access() -> Result<()> {
    let out = roundtrip(&OpaqueRef::new(Point::new(1, 2)))?;
    let err = out.rref::<Size>().unwrap_err();
    assert_eq!(
        s11n_err(&err),
        &S11nError::KindMismatch {
            requested: OpaqueKind::Size,
            actual: OpaqueKind::Point
        }
    );
    Ok(())
}

#[test]
fn mat_tag_in_opaque_handle() -> Result<()> {
    let mut os = ByteMemoryOutStream::new();
    OpaqueKind::Mat.ser(&mut os)?;
    Mat::eye(2, 2, MatType::U8C1)?.ser(&mut os)?;

    let err = OpaqueRef::deser_solo(os.data()).unwrap_err();
    assert_eq!(
        s11n_err(&err),
        &S11nError::UnsupportedKind {
            handle: "OpaqueRef",
            kind: OpaqueKind::Mat
        }
    );
    Ok(())
}

#[test]
fn mat_full_and_view() -> Result<()> {
    let full = Mat::eye(320, 240, MatType::U8C3)?;
    assert_mat_close(&full, &roundtrip(&full)?);

    let view = full.roi(Rect::new(10, 15, 123, 70))?;
    let out = roundtrip(&view)?;
    assert_eq!(out.size(), Size::new(123, 70));
    assert_mat_close(&view, &out);
    Ok(())
}

#[test]
fn mat_desc() -> Result<()> {
    let mat = Mat::zeros(20, 30, MatType::F32C2)?;
    let desc = MatDesc::of(&mat);
    assert_eq!(desc.size, Size::new(30, 20));
    assert_eq!(desc.chan, 2);
    assert!(!desc.planar);
    assert_eq!(roundtrip(&desc)?, desc);
    Ok(())
}

#[test]
fn every_opaque_accessor_is_kind_checked() -> Result<()> {
    let handles = [
        OpaqueRef::default(),
        OpaqueRef::new(true),
        OpaqueRef::new(1i32),
        OpaqueRef::new(1i64),
        OpaqueRef::new(1.0f64),
        OpaqueRef::new(1.0f32),
        OpaqueRef::new(1u64),
        OpaqueRef::new(String::from("s")),
        OpaqueRef::new(Point::new(1, 1)),
        OpaqueRef::new(Point2f::new(1.0, 1.0)),
        OpaqueRef::new(Size::new(1, 1)),
        OpaqueRef::new(Rect::new(1, 1, 1, 1)),
    ];
    for op in handles {
        let op = match op.kind() {
            OpaqueKind::Unknown => op,
            _ => roundtrip(&op)?,
        };
        let hits = count_accessors!(
            opaque_access_succeeds,
            &op,
            bool,
            i32,
            i64,
            f64,
            f32,
            u64,
            String,
            Point,
            Point2f,
            Size,
            Rect,
        );
        let expected = usize::from(op.kind() != OpaqueKind::Unknown);
        assert_eq!(hits, expected, "{op:?}");
    }
    Ok(())
}

#[test]
fn every_vector_accessor_is_kind_checked() -> Result<()> {
    let handles = [
        VectorRef::default(),
        VectorRef::new(vec![true]),
        VectorRef::new(vec![1i32]),
        VectorRef::new(vec![1i64]),
        VectorRef::new(vec![1.0f64]),
        VectorRef::new(vec![1.0f32]),
        VectorRef::new(vec![1u64]),
        VectorRef::new(vec![String::from("s")]),
        VectorRef::new(vec![Point::new(1, 1)]),
        VectorRef::new(vec![Point2f::new(1.0, 1.0)]),
        VectorRef::new(vec![Size::new(1, 1)]),
        VectorRef::new(vec![Rect::new(1, 1, 1, 1)]),
        VectorRef::new(vec![Scalar::all(1.0)]),
        VectorRef::new(vec![Mat::zeros(1, 1, MatType::U8C1)?]),
    ];
    for vr in handles {
        let vr = match vr.kind() {
            OpaqueKind::Unknown => vr,
            _ => roundtrip(&vr)?,
        };
        let hits = count_accessors!(
            vector_access_succeeds,
            &vr,
            bool,
            i32,
            i64,
            f64,
            f32,
            u64,
            String,
            Point,
            Point2f,
            Size,
            Rect,
            Scalar,
            Mat,
        );
        let expected = usize::from(vr.kind() != OpaqueKind::Unknown);
        assert_eq!(hits, expected, "{vr:?}");
    }
    Ok(())
}
