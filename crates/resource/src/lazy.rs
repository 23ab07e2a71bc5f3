
use crate::{DisposeToken, ManagerConfig, ResourceDescriptor, ResourceManager};
use crate::dispose::DisposeHooks;
use error::AllocationError;
use log::{debug, trace, warn};
use lru::LruCache;
use std::collections::HashMap;

/// LazyEvictionManager struct
/// Sits in front of a parent manager and delays the parent's destroy for cacheable descriptors.
/// When the last local reference to such a descriptor goes away it is parked in a bounded LRU set
/// instead of being released; creating it again while parked reuses the parent's instance
/// without any new allocation. Parking beyond the capacity releases the least recently parked
/// descriptor to the parent.
///
/// Towards the parent this layer is a single referent: it holds exactly one parent reference for
/// every descriptor that is either locally referenced or parked. Non-cacheable descriptors pass
/// straight through with no bookkeeping.
pub struct LazyEvictionManager<D, P>
    where D: ResourceDescriptor, P: ResourceManager<D>
{
    parent: P,
    capacity: usize,
    awaiting: LruCache<D, ()>,
    local_counts: HashMap<D, u32>,
    dispose_hooks: DisposeHooks
}

impl<D: ResourceDescriptor, P: ResourceManager<D>> LazyEvictionManager<D, P> {

    /// A capacity of zero parks nothing, so every final destroy reaches the parent immediately.
    pub fn new(parent: P, capacity: usize) -> Self {
        Self {
            parent,
            capacity,
            awaiting: LruCache::unbounded(),
            local_counts: HashMap::new(),
            dispose_hooks: DisposeHooks::new()
        }
    }

    pub fn with_config(parent: P, config: &ManagerConfig) -> Self {
        Self::new(parent, config.cache_capacity)
    }

    #[inline]
    pub fn parent(&self) -> &P {
        &self.parent
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Outstanding local references for a cacheable descriptor. Parked descriptors report zero.
    pub fn ref_count(&self, descriptor: &D) -> u32 {
        self.local_counts.get(descriptor).copied().unwrap_or(0)
    }

    /// Number of distinct cacheable descriptors with outstanding local references.
    pub fn live_count(&self) -> usize {
        self.local_counts.len()
    }

    /// Number of unreferenced descriptors parked and awaiting eviction.
    pub fn cached_count(&self) -> usize {
        self.awaiting.len()
    }

    pub fn is_cached(&self, descriptor: &D) -> bool {
        self.awaiting.contains(descriptor)
    }

    /// Resource for a descriptor this layer already holds a parent reference to. Should the
    /// parent have lost it, the reference is taken again.
    fn resident(&mut self, descriptor: &D) -> Result<P::Resource, AllocationError> {
        match self.parent.find(descriptor) {
            Some(resource) => Ok(resource),
            None => {
                warn!("Parent no longer holds {:?}, creating it again", descriptor);
                self.parent.create(descriptor)
            }
        }
    }

    fn park(&mut self, descriptor: D) {
        self.awaiting.put(descriptor, ());
        while self.awaiting.len() > self.capacity {
            let Some((evicted, ())) = self.awaiting.pop_lru() else {
                break;
            };
            debug!("Evicted {:?} from the lazy cache", evicted);
            self.parent.destroy(&evicted);
        }
    }
}

impl<D: ResourceDescriptor, P: ResourceManager<D>> ResourceManager<D> for LazyEvictionManager<D, P> {
    type Resource = P::Resource;

    fn create(&mut self, descriptor: &D) -> Result<P::Resource, AllocationError> {
        if !descriptor.cacheable() {
            return self.parent.create(descriptor);
        }

        let referenced = self.local_counts.get(descriptor).copied().unwrap_or(0);
        let resource = if referenced > 0 {
            self.resident(descriptor)?
        } else if self.awaiting.pop(descriptor).is_some() {
            debug!("Lazy cache hit for {:?}", descriptor);
            self.resident(descriptor)?
        } else {
            self.parent.create(descriptor)?
        };

        self.local_counts.insert(descriptor.clone(), referenced + 1);
        trace!("Lazy reference taken to {:?}, count now {}", descriptor, referenced + 1);
        Ok(resource)
    }

    fn destroy(&mut self, descriptor: &D) {
        if !descriptor.cacheable() {
            self.parent.destroy(descriptor);
            return;
        }

        let Some(count) = self.local_counts.get_mut(descriptor) else {
            trace!("Ignored destroy of {:?} which holds no references", descriptor);
            return;
        };
        if *count > 1 {
            *count -= 1;
            trace!("Lazy reference dropped from {:?}, count now {}", descriptor, count);
            return;
        }
        self.local_counts.remove(descriptor);
        self.park(descriptor.clone());
    }

    fn find(&self, descriptor: &D) -> Option<P::Resource> {
        self.parent.find(descriptor)
    }

    fn dispose(&mut self) {
        let parked = self.awaiting.len();
        while let Some((descriptor, ())) = self.awaiting.pop_lru() {
            self.parent.destroy(&descriptor);
        }
        if parked > 0 || !self.local_counts.is_empty() {
            debug!(
                "Disposed lazy cache, released {} parked resources and dropped {} referenced",
                parked,
                self.local_counts.len());
        }
        self.local_counts.clear();
        self.dispose_hooks.run_all();
    }

    fn dispose_exec(&mut self, callback: Box<dyn FnOnce()>) -> DisposeToken {
        self.dispose_hooks.register(callback)
    }

    fn cancel_dispose_exec(&mut self, token: DisposeToken) -> bool {
        self.dispose_hooks.cancel(token)
    }
}

impl<D: ResourceDescriptor, P: ResourceManager<D>> Drop for LazyEvictionManager<D, P> {
    fn drop(&mut self) {
        self.dispose();
    }
}
