
use crate::{
    DeviceLoader, DisposeToken, ParentLoader, ResourceDescriptor, ResourceLoader, ResourceManager
};
use crate::dispose::DisposeHooks;
use crate::table::{Release, RefCountTable};
use error::AllocationError;
use log::{debug, trace, warn};

/// Root manager: owns a device and allocates on it directly.
pub type DeviceResourceManager<D, C> = ReferenceCountingManager<D, DeviceLoader<C>>;

/// Nested manager whose resources are references taken from a parent manager. Disposing it
/// returns exactly one reference to the parent per descriptor it still holds, however unbalanced
/// its own callers were.
pub type ScopedManager<D, P> = ReferenceCountingManager<D, ParentLoader<P>>;

/// ReferenceCountingManager struct
/// Keeps one resource per distinct descriptor along with a count of the references handed out.
/// The loader is asked to allocate on the first reference and to deallocate when the last one is
/// destroyed. Dropping the manager disposes it.
pub struct ReferenceCountingManager<D, L>
    where D: ResourceDescriptor, L: ResourceLoader<D>
{
    loader: L,
    table: RefCountTable<D, L::Resource>,
    dispose_hooks: DisposeHooks
}

impl<D: ResourceDescriptor, L: ResourceLoader<D>> ReferenceCountingManager<D, L> {

    pub fn new(loader: L) -> Self {
        Self {
            loader,
            table: RefCountTable::new(),
            dispose_hooks: DisposeHooks::new()
        }
    }

    #[inline]
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Outstanding references for a descriptor; zero when it is not live.
    pub fn ref_count(&self, descriptor: &D) -> u32 {
        self.table.count(descriptor)
    }

    /// Number of distinct descriptors with a live resource.
    pub fn live_count(&self) -> usize {
        self.table.len()
    }
}

impl<D: ResourceDescriptor, C> ReferenceCountingManager<D, DeviceLoader<C>>
    where DeviceLoader<C>: ResourceLoader<D>
{
    pub fn for_device(device: C) -> Self {
        Self::new(DeviceLoader::new(device))
    }

    #[inline]
    pub fn device(&self) -> &C {
        self.loader.device()
    }
}

impl<D: ResourceDescriptor, P: ResourceManager<D>> ReferenceCountingManager<D, ParentLoader<P>> {

    pub fn scoped(parent: P) -> Self {
        Self::new(ParentLoader::new(parent))
    }

    #[inline]
    pub fn parent(&self) -> &P {
        self.loader.parent()
    }
}

impl<D: ResourceDescriptor, L: ResourceLoader<D>> ResourceManager<D> for ReferenceCountingManager<D, L> {
    type Resource = L::Resource;

    fn create(&mut self, descriptor: &D) -> Result<L::Resource, AllocationError> {
        if let Some((resource, count)) = self.table.acquire(descriptor) {
            trace!("Reference taken to {:?}, count now {}", descriptor, count);
            return Ok(resource);
        }
        let resource = self.loader.allocate(descriptor)
            .map_err(|e| {
                warn!("Failed to allocate {:?}: {}", descriptor, e);
                e
            })?;
        self.table.insert(descriptor.clone(), resource.clone());
        debug!("Allocated {:?}", descriptor);
        Ok(resource)
    }

    fn destroy(&mut self, descriptor: &D) {
        match self.table.release(descriptor) {
            Release::Missing => {
                trace!("Ignored destroy of {:?} which holds no references", descriptor);
            },
            Release::Retained(count) => {
                trace!("Reference dropped from {:?}, count now {}", descriptor, count);
            },
            Release::Freed(resource) => {
                self.loader.deallocate(resource, descriptor);
                debug!("Deallocated {:?}", descriptor);
            }
        }
    }

    fn find(&self, descriptor: &D) -> Option<L::Resource> {
        self.table.find(descriptor)
    }

    fn dispose(&mut self) {
        let live = self.table.len();
        for (descriptor, resource) in self.table.drain() {
            self.loader.deallocate(resource, &descriptor);
        }
        if live > 0 {
            debug!("Disposed manager, deallocated {} live resources", live);
        }
        self.dispose_hooks.run_all();
    }

    fn dispose_exec(&mut self, callback: Box<dyn FnOnce()>) -> DisposeToken {
        self.dispose_hooks.register(callback)
    }

    fn cancel_dispose_exec(&mut self, token: DisposeToken) -> bool {
        self.dispose_hooks.cancel(token)
    }
}

impl<D: ResourceDescriptor, L: ResourceLoader<D>> Drop for ReferenceCountingManager<D, L> {
    fn drop(&mut self) {
        self.dispose();
    }
}
