//! # Callback Bindings
//!
//! A binding is "call this procedure on this receiver, expecting this payload
//! shape", erased behind one trait object so bindings of every shape can live
//! in the same registry.
//!
//! ## Shapes
//!
//! | Procedure        | Shape          | Accepts                      |
//! |------------------|----------------|------------------------------|
//! | `Fn(&R)`         | `None`         | `post_notification` only     |
//! | `Fn(&R, V)`      | `ByValue(V)`   | `Payload::value::<V>`        |
//! | `Fn(&R, &V)`     | `ByPointer(V)` | `Payload::pointer::<V>`      |
//!
//! The receiver is held weakly. A binding whose receiver has been dropped
//! reports [`Invocation::ReceiverGone`] instead of calling anything.

use crate::errors::DispatchError;
use crate::identity::ObserverId;
use crate::name::NotificationName;
use crate::payload::{Payload, PayloadShape, TypeTag};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// Unique id of a binding within one center.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(u64);

impl BindingId {
    /// Wrap a raw id.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The raw id.
    #[must_use]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of a successful invocation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Invocation {
    /// The procedure ran.
    Delivered,
    /// The receiver was dropped without deregistering; nothing ran.
    ReceiverGone,
    /// The binding was already removed; nothing ran.
    Retired,
}

impl Invocation {
    /// Whether the procedure actually ran.
    #[must_use]
    pub fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// What the callback is handed.
#[derive(Clone, Copy)]
enum Delivery<'a> {
    Bare,
    Payload(&'a Payload),
}

/// Why the erased callback refused a delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rejection {
    Shape,
    Type,
}

/// Type-erased invocation capability.
trait Callback: Send + Sync {
    fn shape(&self) -> PayloadShape;

    fn call(&self, delivery: Delivery<'_>) -> Result<Invocation, Rejection>;
}

struct BareCallback<R, F> {
    receiver: Weak<R>,
    procedure: F,
}

impl<R, F> Callback for BareCallback<R, F>
where
    R: Send + Sync + 'static,
    F: Fn(&R) + Send + Sync + 'static,
{
    fn shape(&self) -> PayloadShape {
        PayloadShape::None
    }

    fn call(&self, delivery: Delivery<'_>) -> Result<Invocation, Rejection> {
        let Delivery::Bare = delivery else {
            return Err(Rejection::Shape);
        };
        let Some(receiver) = self.receiver.upgrade() else {
            return Ok(Invocation::ReceiverGone);
        };
        (self.procedure)(&*receiver);
        Ok(Invocation::Delivered)
    }
}

struct ValueCallback<R, V, F> {
    receiver: Weak<R>,
    procedure: F,
    _value: PhantomData<fn(V)>,
}

impl<R, V, F> Callback for ValueCallback<R, V, F>
where
    R: Send + Sync + 'static,
    V: Any + Clone + Send + Sync,
    F: Fn(&R, V) + Send + Sync + 'static,
{
    fn shape(&self) -> PayloadShape {
        PayloadShape::ByValue(TypeTag::of::<V>())
    }

    fn call(&self, delivery: Delivery<'_>) -> Result<Invocation, Rejection> {
        let Delivery::Payload(payload) = delivery else {
            return Err(Rejection::Shape);
        };
        let value = payload.as_value::<V>().ok_or(Rejection::Type)?;
        let Some(receiver) = self.receiver.upgrade() else {
            return Ok(Invocation::ReceiverGone);
        };
        (self.procedure)(&*receiver, value.clone());
        Ok(Invocation::Delivered)
    }
}

struct PointerCallback<R, V, F> {
    receiver: Weak<R>,
    procedure: F,
    _value: PhantomData<fn(&V)>,
}

impl<R, V, F> Callback for PointerCallback<R, V, F>
where
    R: Send + Sync + 'static,
    V: Any + Send + Sync,
    F: Fn(&R, &V) + Send + Sync + 'static,
{
    fn shape(&self) -> PayloadShape {
        PayloadShape::ByPointer(TypeTag::of::<V>())
    }

    fn call(&self, delivery: Delivery<'_>) -> Result<Invocation, Rejection> {
        let Delivery::Payload(payload) = delivery else {
            return Err(Rejection::Shape);
        };
        let pointee = payload.as_pointee::<V>().ok_or(Rejection::Type)?;
        let Some(receiver) = self.receiver.upgrade() else {
            return Ok(Invocation::ReceiverGone);
        };
        (self.procedure)(&*receiver, pointee);
        Ok(Invocation::Delivered)
    }
}

/// A registered (receiver, procedure, shape) for one notification name.
///
/// `observer`, `name` and `shape` never change after construction. The only
/// mutable state is liveness, which goes from registered to removed once.
pub struct CallbackBinding {
    id: BindingId,
    observer: ObserverId,
    name: NotificationName,
    shape: PayloadShape,
    callback: Box<dyn Callback>,
    live: AtomicBool,
}

impl CallbackBinding {
    /// Bind a procedure that takes no payload.
    pub fn bare<R, F>(
        id: BindingId,
        observer: ObserverId,
        name: impl Into<NotificationName>,
        receiver: &Arc<R>,
        procedure: F,
    ) -> Self
    where
        R: Send + Sync + 'static,
        F: Fn(&R) + Send + Sync + 'static,
    {
        Self::from_callback(
            id,
            observer,
            name.into(),
            Box::new(BareCallback {
                receiver: Arc::downgrade(receiver),
                procedure,
            }),
        )
    }

    /// Bind a procedure that takes a `V` by value.
    pub fn by_value<R, V, F>(
        id: BindingId,
        observer: ObserverId,
        name: impl Into<NotificationName>,
        receiver: &Arc<R>,
        procedure: F,
    ) -> Self
    where
        R: Send + Sync + 'static,
        V: Any + Clone + Send + Sync,
        F: Fn(&R, V) + Send + Sync + 'static,
    {
        Self::from_callback(
            id,
            observer,
            name.into(),
            Box::new(ValueCallback {
                receiver: Arc::downgrade(receiver),
                procedure,
                _value: PhantomData,
            }),
        )
    }

    /// Bind a procedure that borrows the pointee of a `Payload::pointer::<V>`.
    pub fn by_pointer<R, V, F>(
        id: BindingId,
        observer: ObserverId,
        name: impl Into<NotificationName>,
        receiver: &Arc<R>,
        procedure: F,
    ) -> Self
    where
        R: Send + Sync + 'static,
        V: Any + Send + Sync,
        F: Fn(&R, &V) + Send + Sync + 'static,
    {
        Self::from_callback(
            id,
            observer,
            name.into(),
            Box::new(PointerCallback {
                receiver: Arc::downgrade(receiver),
                procedure,
                _value: PhantomData,
            }),
        )
    }

    fn from_callback(
        id: BindingId,
        observer: ObserverId,
        name: NotificationName,
        callback: Box<dyn Callback>,
    ) -> Self {
        Self {
            id,
            observer,
            name,
            shape: callback.shape(),
            callback,
            live: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn id(&self) -> BindingId {
        self.id
    }

    /// Identity of the owner, used for removal matching.
    #[must_use]
    pub fn observer(&self) -> ObserverId {
        self.observer
    }

    #[must_use]
    pub fn name(&self) -> &NotificationName {
        &self.name
    }

    #[must_use]
    pub fn shape(&self) -> PayloadShape {
        self.shape
    }

    /// Whether the binding is still registered.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Mark the binding removed. Returns `false` if it already was.
    pub(crate) fn retire(&self) -> bool {
        self.live.swap(false, Ordering::AcqRel)
    }

    /// Invoke without a payload.
    ///
    /// # Errors
    ///
    /// `DispatchError::ShapeMismatch` if the binding expects a payload.
    pub fn invoke_bare(&self) -> Result<Invocation, DispatchError> {
        if !self.shape.is_none() {
            return Err(self.shape_mismatch(PayloadShape::None));
        }
        if !self.is_live() {
            return Ok(Invocation::Retired);
        }
        self.callback
            .call(Delivery::Bare)
            .map_err(|rejection| self.reject(rejection, PayloadShape::None))
    }

    /// Invoke with a payload.
    ///
    /// # Errors
    ///
    /// - `DispatchError::ShapeMismatch` if the binding takes no payload
    /// - `DispatchError::TypeMismatch` if the payload is not exactly the
    ///   registered type and kind
    pub fn invoke_with_payload(&self, payload: &Payload) -> Result<Invocation, DispatchError> {
        let supplied = payload.shape();
        if self.shape.is_none() {
            return Err(self.shape_mismatch(supplied));
        }
        if supplied != self.shape {
            return Err(self.type_mismatch(supplied));
        }
        if !self.is_live() {
            return Ok(Invocation::Retired);
        }
        self.callback
            .call(Delivery::Payload(payload))
            .map_err(|rejection| self.reject(rejection, supplied))
    }

    fn reject(&self, rejection: Rejection, supplied: PayloadShape) -> DispatchError {
        match rejection {
            Rejection::Shape => self.shape_mismatch(supplied),
            Rejection::Type => self.type_mismatch(supplied),
        }
    }

    fn shape_mismatch(&self, supplied: PayloadShape) -> DispatchError {
        DispatchError::ShapeMismatch {
            binding: self.id,
            name: self.name.clone(),
            expected: self.shape,
            supplied,
        }
    }

    fn type_mismatch(&self, found: PayloadShape) -> DispatchError {
        DispatchError::TypeMismatch {
            binding: self.id,
            name: self.name.clone(),
            expected: self.shape,
            found,
            delivered: 0,
        }
    }
}

impl fmt::Debug for CallbackBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackBinding")
            .field("id", &self.id)
            .field("observer", &self.observer)
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("live", &self.is_live())
            .finish_non_exhaustive()
    }
}
