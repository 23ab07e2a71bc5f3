
use crate::{DisposeToken, ResourceDescriptor};
use error::AllocationError;
use std::cell::RefCell;
use std::rc::Rc;

/// ResourceManager trait
/// A reference-counted source of resources keyed by descriptor. Every successful `create` must
/// eventually be balanced by one `destroy` for the same descriptor, or by disposing the manager.
///
/// Resources handed out are shared: the same instance is returned for equal descriptors, and it
/// stays valid only while at least one reference is outstanding. Callers must never release a
/// resource themselves.
///
/// Managers are single-threaded. Nothing here locks; calls from several threads must be
/// serialized by the owner.
pub trait ResourceManager<D: ResourceDescriptor> {
    type Resource: Clone;

    /// Takes a reference to the resource for `descriptor`, allocating it if no live instance
    /// exists. On error nothing is recorded.
    fn create(&mut self, descriptor: &D) -> Result<Self::Resource, AllocationError>;

    /// Releases one reference. Destroying a descriptor this manager holds nothing for is a no-op.
    fn destroy(&mut self, descriptor: &D);

    /// Looks up a live resource without touching its reference count.
    fn find(&self, descriptor: &D) -> Option<Self::Resource>;

    /// Find-or-create. A resource that is already present is returned without taking a new
    /// reference.
    fn get(&mut self, descriptor: &D) -> Result<Self::Resource, AllocationError> {
        match self.find(descriptor) {
            Some(resource) => Ok(resource),
            None => self.create(descriptor)
        }
    }

    /// Releases everything this manager still holds, then runs the registered dispose callbacks.
    /// Disposing twice is harmless.
    fn dispose(&mut self);

    /// Registers a callback to run once when this manager is disposed.
    fn dispose_exec(&mut self, callback: Box<dyn FnOnce()>) -> DisposeToken;

    /// Unregisters a dispose callback. Returns false if it already ran or was never registered
    /// here.
    fn cancel_dispose_exec(&mut self, token: DisposeToken) -> bool;
}

impl<D, M> ResourceManager<D> for &mut M
    where D: ResourceDescriptor, M: ResourceManager<D> + ?Sized
{
    type Resource = M::Resource;

    fn create(&mut self, descriptor: &D) -> Result<M::Resource, AllocationError> {
        (**self).create(descriptor)
    }

    fn destroy(&mut self, descriptor: &D) {
        (**self).destroy(descriptor)
    }

    fn find(&self, descriptor: &D) -> Option<M::Resource> {
        (**self).find(descriptor)
    }

    fn get(&mut self, descriptor: &D) -> Result<M::Resource, AllocationError> {
        (**self).get(descriptor)
    }

    fn dispose(&mut self) {
        (**self).dispose()
    }

    fn dispose_exec(&mut self, callback: Box<dyn FnOnce()>) -> DisposeToken {
        (**self).dispose_exec(callback)
    }

    fn cancel_dispose_exec(&mut self, token: DisposeToken) -> bool {
        (**self).cancel_dispose_exec(token)
    }
}

// Shared parent for several sibling layers on one thread. Each call borrows the cell for its own
// duration only, so a dispose callback must not call back into the same manager.
impl<D, M> ResourceManager<D> for Rc<RefCell<M>>
    where D: ResourceDescriptor, M: ResourceManager<D>
{
    type Resource = M::Resource;

    fn create(&mut self, descriptor: &D) -> Result<M::Resource, AllocationError> {
        self.borrow_mut().create(descriptor)
    }

    fn destroy(&mut self, descriptor: &D) {
        self.borrow_mut().destroy(descriptor)
    }

    fn find(&self, descriptor: &D) -> Option<M::Resource> {
        self.borrow().find(descriptor)
    }

    fn get(&mut self, descriptor: &D) -> Result<M::Resource, AllocationError> {
        self.borrow_mut().get(descriptor)
    }

    fn dispose(&mut self) {
        self.borrow_mut().dispose()
    }

    fn dispose_exec(&mut self, callback: Box<dyn FnOnce()>) -> DisposeToken {
        self.borrow_mut().dispose_exec(callback)
    }

    fn cancel_dispose_exec(&mut self, token: DisposeToken) -> bool {
        self.borrow_mut().cancel_dispose_exec(token)
    }
}
