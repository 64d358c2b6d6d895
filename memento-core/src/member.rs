/// What an attachment facility found in a class member slot.
///
/// Memoization only applies to callables. A slot holding anything else is
/// passed through untouched, with no caching behaviour attached.
///
/// # Examples
///
/// ```
/// use memento_core::MemberDescriptor;
///
/// let field: MemberDescriptor<fn(&(), (u8,)) -> u8, &str> = MemberDescriptor::Value("label");
/// let mapped = field.map_method(|_f| "wrapped");
/// assert!(matches!(mapped, MemberDescriptor::Value("label")));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberDescriptor<F, V> {
    Method(F),
    Value(V),
}

impl<F, V> MemberDescriptor<F, V> {
    /// Replaces a `Method` through `wrap`, leaving a `Value` as it was.
    pub fn map_method<G>(self, wrap: impl FnOnce(F) -> G) -> MemberDescriptor<G, V> {
        match self {
            MemberDescriptor::Method(method) => MemberDescriptor::Method(wrap(method)),
            MemberDescriptor::Value(value) => MemberDescriptor::Value(value),
        }
    }

    pub fn is_method(&self) -> bool {
        matches!(self, MemberDescriptor::Method(_))
    }

    pub fn as_method(&self) -> Option<&F> {
        match self {
            MemberDescriptor::Method(method) => Some(method),
            MemberDescriptor::Value(_) => None,
        }
    }

    pub fn into_value(self) -> Option<V> {
        match self {
            MemberDescriptor::Method(_) => None,
            MemberDescriptor::Value(value) => Some(value),
        }
    }
}
