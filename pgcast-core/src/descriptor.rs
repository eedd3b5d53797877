use crate::{CastContext, Error, Oid, Parser, Result, Value};
use std::{borrow::Cow, sync::Arc};

/// Binds a set of server type identifiers to one parser.
///
/// The identifiers are fixed at construction and never empty. A descriptor compares
/// equal to every identifier it matches.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: Cow<'static, str>,
    oids: Box<[Oid]>,
    parser: Parser,
}

impl TypeDescriptor {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        oids: impl IntoIterator<Item = Oid>,
        parser: Parser,
    ) -> Result<Self> {
        let name = name.into();
        let oids: Box<[Oid]> = oids.into_iter().collect();
        if oids.is_empty() {
            return Err(Error::msg(format!(
                "Type descriptor `{name}` must match at least one type identifier"
            )));
        }
        Ok(Self { name, oids, parser })
    }

    /// Constructor for the builtin table, whose identifier lists are never empty.
    pub(crate) fn builtin(name: &'static str, oids: &[Oid], parser: Parser) -> Self {
        debug_assert!(!oids.is_empty(), "{name} must match at least one type");
        Self {
            name: name.into(),
            oids: oids.into(),
            parser,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn oids(&self) -> &[Oid] {
        &self.oids
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    pub fn matches(&self, oid: Oid) -> bool {
        self.oids.contains(&oid)
    }

    /// Converts a raw value with the parser of this descriptor.
    pub fn cast(
        &self,
        raw: Option<&[u8]>,
        length: Option<usize>,
        context: &CastContext,
    ) -> Result<Value> {
        self.parser.cast(raw, length, context)
    }
}

impl PartialEq<Oid> for TypeDescriptor {
    fn eq(&self, other: &Oid) -> bool {
        self.matches(*other)
    }
}

impl PartialEq<TypeDescriptor> for Oid {
    fn eq(&self, other: &TypeDescriptor) -> bool {
        other.matches(*self)
    }
}

/// Creates a descriptor converting values with a user supplied function.
pub fn new_type(
    oids: impl IntoIterator<Item = Oid>,
    name: impl Into<Cow<'static, str>>,
    caster: impl Fn(Option<&str>, &CastContext) -> Result<Value> + Send + Sync + 'static,
) -> Result<Arc<TypeDescriptor>> {
    TypeDescriptor::new(name, oids, Parser::custom(caster)).map(Arc::new)
}

/// Creates a descriptor for arrays whose elements are converted by `base`.
pub fn new_array_type(
    oids: impl IntoIterator<Item = Oid>,
    name: impl Into<Cow<'static, str>>,
    base: &TypeDescriptor,
) -> Result<Arc<TypeDescriptor>> {
    TypeDescriptor::new(name, oids, Parser::array_of(base.parser.clone())).map(Arc::new)
}

/// Invokes the parser of `descriptor` on a raw value.
pub fn typecast(
    descriptor: &TypeDescriptor,
    raw: Option<&[u8]>,
    length: Option<usize>,
    context: &CastContext,
) -> Result<Value> {
    descriptor.cast(raw, length, context)
}
