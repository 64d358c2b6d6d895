use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A reference to a heap object, compared by identity.
///
/// Two `ObjectKey`s are equal only when they point at the same `Rc`
/// allocation. Structurally equal values living in different allocations
/// are different keys.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use memento_core::ObjectKey;
///
/// let a = Rc::new(vec![1, 2, 3]);
/// let b = Rc::new(vec![1, 2, 3]);
///
/// assert_eq!(ObjectKey::new(a.clone()), ObjectKey::new(a.clone()));
/// assert_ne!(ObjectKey::new(a), ObjectKey::new(b));
/// ```
#[derive(Clone)]
pub struct ObjectKey {
    object: Rc<dyn Any>,
}

impl ObjectKey {
    pub fn new<T: Any>(object: Rc<T>) -> Self {
        Self { object }
    }

    /// Address of the referenced allocation.
    #[inline]
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.object) as *const () as usize
    }

    /// Strong handle to the referenced object.
    pub fn object(&self) -> &Rc<dyn Any> {
        &self.object
    }
}

impl PartialEq for ObjectKey {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for ObjectKey {}

impl Hash for ObjectKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectKey({:#x})", self.addr())
    }
}

/// Key under which a call's result is stored.
///
/// Primitive variants compare by value. `Object` compares by identity, and
/// is the only variant that qualifies a single-argument call for the
/// identity-keyed store. `Composite` lets resolvers combine several
/// arguments into one key.
///
/// Numbers compare by numeric value: an integral float folds into `Int`, so
/// `1.0` and `1` are the same key. Float keys use same-value-zero equality:
/// `0.0` and `-0.0` are the same key, and every NaN is the same key.
///
/// # Examples
///
/// ```
/// use memento_core::CacheKey;
///
/// assert_eq!(CacheKey::from(3_i32), CacheKey::Int(3));
/// assert_eq!(CacheKey::from(-0.0_f64), CacheKey::from(0.0_f64));
/// assert_eq!(CacheKey::from(f64::NAN), CacheKey::from(f64::NAN));
///
/// let composite = CacheKey::from((1_i32, "user"));
/// assert_eq!(
///     composite,
///     CacheKey::Composite(vec![CacheKey::Int(1), CacheKey::Str("user".into())])
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// No argument at that position.
    Undefined,
    Unit,
    Bool(bool),
    Int(i128),
    Float(u64),
    Char(char),
    Str(Box<str>),
    Composite(Vec<CacheKey>),
    Object(ObjectKey),
}

impl CacheKey {
    /// Builds a numeric key from a float.
    ///
    /// Integral values inside the `i128` range become `Int`; `-0.0` therefore
    /// lands on `Int(0)`. Every NaN maps to the same key.
    pub fn float(value: f64) -> Self {
        // i128::MAX as f64 rounds up to 2^127, hence the exclusive bound
        if value.fract() == 0.0 && value >= i128::MIN as f64 && value < i128::MAX as f64 {
            return CacheKey::Int(value as i128);
        }

        let normalized = if value.is_nan() { f64::NAN } else { value };
        CacheKey::Float(normalized.to_bits())
    }

    /// Builds a composite key from any sequence of keys.
    pub fn composite<I, K>(parts: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<CacheKey>,
    {
        CacheKey::Composite(parts.into_iter().map(Into::into).collect())
    }

    /// Returns the object reference when this key is object-like.
    pub fn as_object(&self) -> Option<&ObjectKey> {
        match self {
            CacheKey::Object(object) => Some(object),
            _ => None,
        }
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, CacheKey::Object(_))
    }
}

macro_rules! impl_int_key {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CacheKey {
                fn from(value: $t) -> Self {
                    CacheKey::Int(value as i128)
                }
            }
        )*
    };
}

impl_int_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<f32> for CacheKey {
    fn from(value: f32) -> Self {
        CacheKey::float(value as f64)
    }
}

impl From<f64> for CacheKey {
    fn from(value: f64) -> Self {
        CacheKey::float(value)
    }
}

impl From<bool> for CacheKey {
    fn from(value: bool) -> Self {
        CacheKey::Bool(value)
    }
}

impl From<char> for CacheKey {
    fn from(value: char) -> Self {
        CacheKey::Char(value)
    }
}

impl From<()> for CacheKey {
    fn from(_: ()) -> Self {
        CacheKey::Unit
    }
}

impl From<&str> for CacheKey {
    fn from(value: &str) -> Self {
        CacheKey::Str(value.into())
    }
}

impl From<String> for CacheKey {
    fn from(value: String) -> Self {
        CacheKey::Str(value.into_boxed_str())
    }
}

impl From<Vec<CacheKey>> for CacheKey {
    fn from(parts: Vec<CacheKey>) -> Self {
        CacheKey::Composite(parts)
    }
}

impl From<ObjectKey> for CacheKey {
    fn from(object: ObjectKey) -> Self {
        CacheKey::Object(object)
    }
}

impl<T: Any> From<Rc<T>> for CacheKey {
    fn from(object: Rc<T>) -> Self {
        CacheKey::Object(ObjectKey::new(object))
    }
}

impl<T: Into<CacheKey>> From<Option<T>> for CacheKey {
    fn from(value: Option<T>) -> Self {
        value.map_or(CacheKey::Unit, Into::into)
    }
}

macro_rules! impl_tuple_key {
    ($($name:ident),+) => {
        impl<$($name: Into<CacheKey>),+> From<($($name,)+)> for CacheKey {
            #[allow(non_snake_case)]
            fn from(($($name,)+): ($($name,)+)) -> Self {
                CacheKey::Composite(vec![$($name.into()),+])
            }
        }
    };
}

impl_tuple_key!(A, B);
impl_tuple_key!(A, B, C);
impl_tuple_key!(A, B, C, D);

/// A single call argument that can stand in as a cache key.
///
/// Primitive arguments produce value keys. `Rc<T>` produces an object key,
/// which makes a single-argument call eligible for the identity-keyed store.
///
/// Implement this for your own argument types to control how they key the
/// bounded store:
///
/// ```
/// use memento_core::{CacheKey, KeyArg};
///
/// struct UserId(u64);
///
/// impl KeyArg for UserId {
///     fn cache_key(&self) -> CacheKey {
///         CacheKey::Int(self.0 as i128)
///     }
/// }
///
/// assert_eq!(UserId(7).cache_key(), CacheKey::Int(7));
/// ```
pub trait KeyArg {
    fn cache_key(&self) -> CacheKey;
}

macro_rules! impl_copy_key_arg {
    ($($t:ty),*) => {
        $(
            impl KeyArg for $t {
                #[inline]
                fn cache_key(&self) -> CacheKey {
                    CacheKey::from(*self)
                }
            }
        )*
    };
}

impl_copy_key_arg!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize, f32, f64, bool, char
);

impl KeyArg for () {
    fn cache_key(&self) -> CacheKey {
        CacheKey::Unit
    }
}

impl KeyArg for str {
    fn cache_key(&self) -> CacheKey {
        CacheKey::from(self)
    }
}

impl KeyArg for String {
    fn cache_key(&self) -> CacheKey {
        CacheKey::from(self.as_str())
    }
}

impl<T: KeyArg + ?Sized> KeyArg for &T {
    fn cache_key(&self) -> CacheKey {
        (**self).cache_key()
    }
}

impl<T: KeyArg> KeyArg for Option<T> {
    fn cache_key(&self) -> CacheKey {
        self.as_ref().map_or(CacheKey::Unit, KeyArg::cache_key)
    }
}

impl<T: Any> KeyArg for Rc<T> {
    fn cache_key(&self) -> CacheKey {
        CacheKey::Object(ObjectKey::new(Rc::clone(self)))
    }
}

impl KeyArg for CacheKey {
    fn cache_key(&self) -> CacheKey {
        self.clone()
    }
}

/// A positional argument list as seen by the memoization wrapper.
///
/// Only the arity and the key of argument 0 matter: without a resolver,
/// trailing arguments never contribute to the key.
///
/// Implemented for `()`, tuples up to arity 8, and `Vec<T>` for call sites
/// whose arity is only known at runtime.
pub trait CallArgs {
    fn arity(&self) -> usize;

    /// Key of the first argument, `CacheKey::Undefined` if there is none.
    fn first_key(&self) -> CacheKey;
}

impl CallArgs for () {
    fn arity(&self) -> usize {
        0
    }

    fn first_key(&self) -> CacheKey {
        CacheKey::Undefined
    }
}

impl<T: KeyArg> CallArgs for Vec<T> {
    fn arity(&self) -> usize {
        self.len()
    }

    fn first_key(&self) -> CacheKey {
        self.first()
            .map_or(CacheKey::Undefined, KeyArg::cache_key)
    }
}

macro_rules! impl_call_args {
    ($arity:expr; $first:ident $(, $rest:ident)*) => {
        impl<$first: KeyArg $(, $rest)*> CallArgs for ($first, $($rest,)*) {
            #[inline]
            fn arity(&self) -> usize {
                $arity
            }

            fn first_key(&self) -> CacheKey {
                self.0.cache_key()
            }
        }
    };
}

impl_call_args!(1; A);
impl_call_args!(2; A, B);
impl_call_args!(3; A, B, C);
impl_call_args!(4; A, B, C, D);
impl_call_args!(5; A, B, C, D, E);
impl_call_args!(6; A, B, C, D, E, G);
impl_call_args!(7; A, B, C, D, E, G, H);
impl_call_args!(8; A, B, C, D, E, G, H, I);
