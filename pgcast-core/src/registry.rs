use crate::{
    CastContext, Error, Oid, Result, TypeDescriptor, TypecastError, Value, builtins::UNKNOWN,
    default_registry,
};
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, LazyLock, RwLock},
};

/// Mapping from type identifier to descriptor for one scope.
#[derive(Default, Debug, Clone)]
pub struct TypeRegistry {
    types: HashMap<Oid, Arc<TypeDescriptor>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps every identifier of `descriptor` to it, replacing previous entries.
    pub fn insert(&mut self, descriptor: Arc<TypeDescriptor>) {
        for oid in descriptor.oids() {
            if let Some(previous) = self.types.insert(*oid, Arc::clone(&descriptor))
                && previous.name() != descriptor.name()
            {
                log::trace!(
                    "Type {oid} moves from {} to {}",
                    previous.name(),
                    descriptor.name()
                );
            }
        }
    }

    pub fn get(&self, oid: Oid) -> Option<&Arc<TypeDescriptor>> {
        self.types.get(&oid)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Oid, &Arc<TypeDescriptor>)> {
        self.types.iter().map(|(k, v)| (*k, v))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CursorId(u64);

/// Visibility tier of a registration.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    #[default]
    Global,
    Connection(ConnectionId),
    Cursor(CursorId),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => f.write_str("global"),
            Scope::Connection(id) => write!(f, "connection {}", id.0),
            Scope::Cursor(id) => write!(f, "cursor {}", id.0),
        }
    }
}

/// Registries consulted to resolve a type, most specific first.
#[derive(Debug, Clone, Copy)]
pub struct RegistryChain<'a> {
    pub cursor: Option<&'a TypeRegistry>,
    pub connection: Option<&'a TypeRegistry>,
    pub global: &'a TypeRegistry,
}

impl<'a> RegistryChain<'a> {
    /// Descriptor of `oid` from the first registry knowing it, [`UNKNOWN`] otherwise.
    pub fn resolve(&self, oid: Oid) -> &'a Arc<TypeDescriptor> {
        [self.cursor, self.connection, Some(self.global)]
            .into_iter()
            .flatten()
            .find_map(|registry| registry.get(oid))
            .unwrap_or_else(|| &*UNKNOWN)
    }

    /// Resolves the type of a value and converts it.
    pub fn typecast(
        &self,
        oid: Oid,
        raw: Option<&[u8]>,
        length: Option<usize>,
        context: &CastContext,
    ) -> Result<Value> {
        self.resolve(oid).cast(raw, length, context)
    }
}

#[derive(Debug)]
struct CursorTypes {
    connection: ConnectionId,
    types: TypeRegistry,
}

/// Type registries of the global scope and of every open connection and cursor.
///
/// The global registry starts as a copy of [`default_registry`]. Connection and cursor
/// registries start empty and only hold overrides, resolution falls back from cursor
/// to connection to global.
#[derive(Debug)]
pub struct Typecasts {
    global: TypeRegistry,
    connections: HashMap<ConnectionId, TypeRegistry>,
    cursors: HashMap<CursorId, CursorTypes>,
    next_id: u64,
}

impl Typecasts {
    pub fn new() -> Self {
        Self {
            global: default_registry().clone(),
            connections: Default::default(),
            cursors: Default::default(),
            next_id: 1,
        }
    }

    /// Opens the scope of a new connection.
    pub fn connect(&mut self) -> ConnectionId {
        let id = ConnectionId(self.next_id);
        self.next_id += 1;
        self.connections.insert(id, TypeRegistry::new());
        log::debug!("Opened {}", Scope::Connection(id));
        id
    }

    /// Opens the scope of a new cursor of `connection`.
    pub fn open_cursor(&mut self, connection: ConnectionId) -> Result<CursorId> {
        if !self.connections.contains_key(&connection) {
            return Err(invalid_scope(Scope::Connection(connection)));
        }
        let id = CursorId(self.next_id);
        self.next_id += 1;
        self.cursors.insert(
            id,
            CursorTypes {
                connection,
                types: TypeRegistry::new(),
            },
        );
        log::debug!("Opened {} on {}", Scope::Cursor(id), Scope::Connection(connection));
        Ok(id)
    }

    pub fn close_cursor(&mut self, cursor: CursorId) -> Result<()> {
        self.cursors
            .remove(&cursor)
            .ok_or_else(|| invalid_scope(Scope::Cursor(cursor)))?;
        log::debug!("Closed {}", Scope::Cursor(cursor));
        Ok(())
    }

    /// Closes a connection together with its cursors.
    pub fn close_connection(&mut self, connection: ConnectionId) -> Result<()> {
        self.connections
            .remove(&connection)
            .ok_or_else(|| invalid_scope(Scope::Connection(connection)))?;
        self.cursors.retain(|_, c| c.connection != connection);
        log::debug!("Closed {}", Scope::Connection(connection));
        Ok(())
    }

    /// Registers `descriptor` for all its identifiers in the registry of `scope`,
    /// replacing what that scope had for them.
    pub fn register(
        &mut self,
        descriptor: impl Into<Arc<TypeDescriptor>>,
        scope: Scope,
    ) -> Result<()> {
        let descriptor = descriptor.into();
        let registry = match scope {
            Scope::Global => &mut self.global,
            Scope::Connection(id) => self
                .connections
                .get_mut(&id)
                .ok_or_else(|| invalid_scope(scope))?,
            Scope::Cursor(id) => {
                &mut self
                    .cursors
                    .get_mut(&id)
                    .ok_or_else(|| invalid_scope(scope))?
                    .types
            }
        };
        log::debug!(
            "Registering type {} for {:?} in the {scope} scope",
            descriptor.name(),
            descriptor.oids()
        );
        registry.insert(descriptor);
        Ok(())
    }

    /// The registries visible from `scope`.
    pub fn chain(&self, scope: Scope) -> Result<RegistryChain<'_>> {
        let (cursor, connection) = match scope {
            Scope::Global => (None, None),
            Scope::Connection(id) => (
                None,
                Some(self.connections.get(&id).ok_or_else(|| invalid_scope(scope))?),
            ),
            Scope::Cursor(id) => {
                let cursor = self.cursors.get(&id).ok_or_else(|| invalid_scope(scope))?;
                (Some(&cursor.types), self.connections.get(&cursor.connection))
            }
        };
        Ok(RegistryChain {
            cursor,
            connection,
            global: &self.global,
        })
    }

    pub fn resolve(&self, scope: Scope, oid: Oid) -> Result<&Arc<TypeDescriptor>> {
        Ok(self.chain(scope)?.resolve(oid))
    }

    /// Resolves the descriptor of `oid` as seen from `scope` and converts `raw` with it.
    pub fn typecast(
        &self,
        scope: Scope,
        oid: Oid,
        raw: Option<&[u8]>,
        length: Option<usize>,
        context: &CastContext,
    ) -> Result<Value> {
        self.chain(scope)?.typecast(oid, raw, length, context)
    }
}

impl Default for Typecasts {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid_scope(scope: Scope) -> Error {
    TypecastError::InvalidScope(format!("{scope} is not open")).into()
}

static TYPECASTS: LazyLock<RwLock<Typecasts>> = LazyLock::new(Default::default);

/// The process wide registries.
pub fn typecasts() -> &'static RwLock<Typecasts> {
    &TYPECASTS
}

/// Registers `descriptor` in the process wide registries.
pub fn register_type(descriptor: impl Into<Arc<TypeDescriptor>>, scope: Scope) -> Result<()> {
    TYPECASTS
        .write()
        .map_err(|e| Error::msg(format!("The type registry is poisoned: {e}")))?
        .register(descriptor, scope)
}
