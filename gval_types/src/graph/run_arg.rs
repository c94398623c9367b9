use crate::types::{
    ArrayPayload, Mat, OpaqueKind, OpaqueRef, Point, Point2f, Rect, Scalar, Size, VectorRef,
};

/// A value passed into or out of a compiled graph at run time.
#[derive(PartialEq, Clone, Debug)]
pub enum RunArg {
    Mat(Mat),
    Scalar(Scalar),
    Opaque(OpaqueRef),
    Vector(VectorRef),
}
crate::s11n_variant! {
    RunArg {
        Mat(Mat) = 0,
        Scalar(Scalar) = 1,
        Opaque(OpaqueRef) = 2,
        Vector(VectorRef) = 3,
    }
}

pub type RunArgs = Vec<RunArg>;

impl RunArg {
    /// The kind of the carried data. For handles this is the handle's own tag.
    pub fn opaque_kind(&self) -> OpaqueKind {
        match self {
            Self::Mat(_) => OpaqueKind::Mat,
            Self::Scalar(_) => OpaqueKind::Scalar,
            Self::Opaque(r) => r.kind(),
            Self::Vector(r) => r.kind(),
        }
    }
}

pub trait IntoRunArg {
    fn into_run_arg(self) -> RunArg;
}

impl IntoRunArg for RunArg {
    fn into_run_arg(self) -> RunArg {
        self
    }
}
impl IntoRunArg for Mat {
    fn into_run_arg(self) -> RunArg {
        RunArg::Mat(self)
    }
}
impl IntoRunArg for Scalar {
    fn into_run_arg(self) -> RunArg {
        RunArg::Scalar(self)
    }
}
impl IntoRunArg for OpaqueRef {
    fn into_run_arg(self) -> RunArg {
        RunArg::Opaque(self)
    }
}
impl IntoRunArg for VectorRef {
    fn into_run_arg(self) -> RunArg {
        RunArg::Vector(self)
    }
}
impl<T: ArrayPayload> IntoRunArg for Vec<T> {
    fn into_run_arg(self) -> RunArg {
        RunArg::Vector(VectorRef::new(self))
    }
}

macro_rules! impl_into_opaque_run_arg {
    ($($t:ty),*) => {
        $(
            impl IntoRunArg for $t {
                fn into_run_arg(self) -> RunArg {
                    RunArg::Opaque(OpaqueRef::new(self))
                }
            }
        )*
    };
}

impl_into_opaque_run_arg!(bool, i32, i64, f64, f32, u64, String, Point, Point2f, Size, Rect);

/// Packs host values into [`RunArgs`], picking the handle and kind from each value's type.
///
/// ```
/// use gval_types::gin;
/// use gval_types::types::{OpaqueKind, Point};
///
/// let args = gin!(7i32, Point::new(1, 2), vec![0.5f64, 1.5]);
/// assert_eq!(args[0].opaque_kind(), OpaqueKind::Int);
/// assert_eq!(args[1].opaque_kind(), OpaqueKind::Point);
/// assert_eq!(args[2].opaque_kind(), OpaqueKind::Double);
/// ```
#[macro_export]
macro_rules! gin {
    ($($arg:expr),* $(,)?) => {
        {
            let args: $crate::graph::RunArgs =
                ::std::vec![$( $crate::graph::IntoRunArg::into_run_arg($arg) ),*];
            args
        }
    };
}

/// A mutable view of a [`RunArg`], through which a graph writes its outputs in place.
#[derive(Debug)]
pub enum RunArgP<'a> {
    Mat(&'a mut Mat),
    Scalar(&'a mut Scalar),
    Opaque(&'a mut OpaqueRef),
    Vector(&'a mut VectorRef),
}

impl<'a> From<&'a mut RunArg> for RunArgP<'a> {
    fn from(arg: &'a mut RunArg) -> Self {
        match arg {
            RunArg::Mat(m) => Self::Mat(m),
            RunArg::Scalar(s) => Self::Scalar(s),
            RunArg::Opaque(r) => Self::Opaque(r),
            RunArg::Vector(r) => Self::Vector(r),
        }
    }
}

impl RunArgP<'_> {
    pub fn opaque_kind(&self) -> OpaqueKind {
        match self {
            Self::Mat(_) => OpaqueKind::Mat,
            Self::Scalar(_) => OpaqueKind::Scalar,
            Self::Opaque(r) => r.kind(),
            Self::Vector(r) => r.kind(),
        }
    }
}

pub fn bind(args: &mut [RunArg]) -> Vec<RunArgP<'_>> {
    args.iter_mut().map(RunArgP::from).collect()
}
