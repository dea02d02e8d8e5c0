//! # Payloads and Shapes
//!
//! A payload is a tagged value: the erased data plus a [`TypeTag`] naming its
//! exact runtime type and a [`PayloadKind`] saying whether it travels by value
//! or behind a shared pointer. Bindings record the [`PayloadShape`] they
//! expect when they are registered, and delivery is a tag comparison against
//! that shape. There is no conversion between types: an `i32` never satisfies
//! a `u32` binding, and `Arc<T>` never satisfies a by-value `T` binding.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identifies an exact runtime type.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Tag of `T`.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying type id.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Human-readable type name, for diagnostics only.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this tag names `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// How a payload is carried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// Owned value, cloned into each by-value procedure.
    Value,
    /// Shared pointer, lent to each by-pointer procedure.
    Pointer,
}

/// What a binding expects at dispatch time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PayloadShape {
    /// No payload.
    None,
    /// A value of exactly this type.
    ByValue(TypeTag),
    /// A pointer to exactly this type.
    ByPointer(TypeTag),
}

impl PayloadShape {
    /// Whether the shape takes no payload.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The expected type, if any.
    #[must_use]
    pub fn tag(&self) -> Option<TypeTag> {
        match self {
            Self::None => None,
            Self::ByValue(tag) | Self::ByPointer(tag) => Some(*tag),
        }
    }

    /// The expected payload kind, if any.
    #[must_use]
    pub fn kind(&self) -> Option<PayloadKind> {
        match self {
            Self::None => None,
            Self::ByValue(_) => Some(PayloadKind::Value),
            Self::ByPointer(_) => Some(PayloadKind::Pointer),
        }
    }
}

impl fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::ByValue(tag) => write!(f, "value<{tag}>"),
            Self::ByPointer(tag) => write!(f, "pointer<{tag}>"),
        }
    }
}

enum Repr {
    Value(Box<dyn Any + Send + Sync>),
    Pointer(Arc<dyn Any + Send + Sync>),
}

/// A runtime-typed notification payload.
pub struct Payload {
    tag: TypeTag,
    repr: Repr,
}

impl Payload {
    /// Carry `value` by value.
    #[must_use]
    pub fn value<V: Any + Send + Sync>(value: V) -> Self {
        Self {
            tag: TypeTag::of::<V>(),
            repr: Repr::Value(Box::new(value)),
        }
    }

    /// Carry a shared pointer to a `V`.
    #[must_use]
    pub fn pointer<V: Any + Send + Sync>(pointer: Arc<V>) -> Self {
        let erased: Arc<dyn Any + Send + Sync> = pointer;
        Self {
            tag: TypeTag::of::<V>(),
            repr: Repr::Pointer(erased),
        }
    }

    /// Tag of the carried type (the pointee for pointer payloads).
    #[must_use]
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// How the payload is carried.
    #[must_use]
    pub fn kind(&self) -> PayloadKind {
        match self.repr {
            Repr::Value(_) => PayloadKind::Value,
            Repr::Pointer(_) => PayloadKind::Pointer,
        }
    }

    /// The shape of binding this payload satisfies.
    #[must_use]
    pub fn shape(&self) -> PayloadShape {
        match self.repr {
            Repr::Value(_) => PayloadShape::ByValue(self.tag),
            Repr::Pointer(_) => PayloadShape::ByPointer(self.tag),
        }
    }

    /// Borrow the value if this is a by-value payload of exactly `V`.
    #[must_use]
    pub fn as_value<V: Any>(&self) -> Option<&V> {
        match &self.repr {
            Repr::Value(value) if self.tag.is::<V>() => (**value).downcast_ref::<V>(),
            _ => None,
        }
    }

    /// Borrow the pointee if this is a pointer payload to exactly `V`.
    #[must_use]
    pub fn as_pointee<V: Any>(&self) -> Option<&V> {
        match &self.repr {
            Repr::Pointer(pointer) if self.tag.is::<V>() => (**pointer).downcast_ref::<V>(),
            _ => None,
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("shape", &self.shape())
            .finish_non_exhaustive()
    }
}
