
use crate::{DeviceDescriptor, ResourceDescriptor, ResourceManager};
use error::AllocationError;

/// ResourceLoader trait
/// The allocate/deallocate pair a reference-counting manager uses to produce and release the
/// resources behind its table. `deallocate` is called exactly once per successful `allocate`.
pub trait ResourceLoader<D: ResourceDescriptor> {
    type Resource: Clone;

    /// Must not leak anything when it fails.
    fn allocate(&mut self, descriptor: &D) -> Result<Self::Resource, AllocationError>;

    fn deallocate(&mut self, resource: Self::Resource, descriptor: &D);
}

/// DeviceLoader struct
/// Owns the device context that resources are created on, and lets each descriptor do its own
/// creation and destruction against it. Only the owning manager can reach the device mutably, so
/// callers holding a resource have no path to free it other than through the manager.
pub struct DeviceLoader<C> {
    device: C
}

impl<C> DeviceLoader<C> {

    pub fn new(device: C) -> Self {
        Self { device }
    }

    #[inline]
    pub fn device(&self) -> &C {
        &self.device
    }
}

impl<C, D: DeviceDescriptor<C>> ResourceLoader<D> for DeviceLoader<C> {
    type Resource = D::Resource;

    fn allocate(&mut self, descriptor: &D) -> Result<D::Resource, AllocationError> {
        descriptor.create_resource(&mut self.device)
    }

    fn deallocate(&mut self, resource: D::Resource, descriptor: &D) {
        descriptor.destroy_resource(resource, &mut self.device);
    }
}

/// ParentLoader struct
/// Allocates by taking a reference from a parent manager and deallocates by handing that
/// reference back. This is what makes a reference-counting manager a nested scope.
pub struct ParentLoader<P> {
    parent: P
}

impl<P> ParentLoader<P> {

    pub fn new(parent: P) -> Self {
        Self { parent }
    }

    #[inline]
    pub fn parent(&self) -> &P {
        &self.parent
    }
}

impl<D: ResourceDescriptor, P: ResourceManager<D>> ResourceLoader<D> for ParentLoader<P> {
    type Resource = P::Resource;

    fn allocate(&mut self, descriptor: &D) -> Result<P::Resource, AllocationError> {
        self.parent.create(descriptor)
    }

    fn deallocate(&mut self, _resource: P::Resource, descriptor: &D) {
        self.parent.destroy(descriptor);
    }
}
