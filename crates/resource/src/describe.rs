
use error::AllocationError;
use std::fmt::Debug;
use std::hash::Hash;

/// ResourceDescriptor trait
/// An immutable, value-comparable key describing one resource. Two descriptors that compare
/// equal must describe interchangeable resources, since managers share a single instance between
/// all equal descriptors.
pub trait ResourceDescriptor: Clone + Eq + Hash + Debug {

    /// Whether a lazy manager may keep this resource alive after its last reference is gone.
    /// All equal descriptors must report the same value.
    fn cacheable(&self) -> bool {
        true
    }
}

/// DeviceDescriptor trait
/// A descriptor that knows how to create and destroy its resource on a device context of type
/// `C`. The resource returned by `create_resource` must be released only through
/// `destroy_resource`, which the owning manager calls exactly once.
pub trait DeviceDescriptor<C>: ResourceDescriptor {
    type Resource: Clone;

    fn create_resource(&self, device: &mut C) -> Result<Self::Resource, AllocationError>;

    /// Deallocation cannot fail from the manager's point of view; backend problems should be
    /// logged here and swallowed.
    fn destroy_resource(&self, resource: Self::Resource, device: &mut C);
}
