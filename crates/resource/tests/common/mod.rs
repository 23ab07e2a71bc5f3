#![allow(dead_code)]

use resource::{
    AllocationError, DeviceDescriptor, DisposeToken, ResourceDescriptor, ResourceManager
};
use std::collections::HashSet;

/// Handle values given out by the recording display
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct DisplayHandle(pub u32);

/// A fake display that hands out numbered handles and remembers what it was asked to do
#[derive(Default)]
pub struct RecordingDisplay {
    next_handle: u32,
    pub live: HashSet<DisplayHandle>,
    pub allocations: Vec<Graphic>,
    pub deallocations: Vec<Graphic>,
    pub refused: HashSet<Graphic>
}

impl RecordingDisplay {

    pub fn refusing(graphic: Graphic) -> Self {
        let mut display = Self::default();
        display.refused.insert(graphic);
        display
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Graphic {
    Color { r: u8, g: u8, b: u8 },
    Font { name: &'static str, height: u32 },
    Image { path: &'static str, cacheable: bool }
}

pub fn color(r: u8, g: u8, b: u8) -> Graphic {
    Graphic::Color { r, g, b }
}

pub fn font(name: &'static str, height: u32) -> Graphic {
    Graphic::Font { name, height }
}

pub fn uncached_image(path: &'static str) -> Graphic {
    Graphic::Image { path, cacheable: false }
}

impl ResourceDescriptor for Graphic {
    fn cacheable(&self) -> bool {
        match self {
            Graphic::Image { cacheable, .. } => *cacheable,
            _ => true
        }
    }
}

impl DeviceDescriptor<RecordingDisplay> for Graphic {
    type Resource = DisplayHandle;

    fn create_resource(
        &self,
        display: &mut RecordingDisplay
    ) -> Result<DisplayHandle, AllocationError> {
        if display.refused.contains(self) {
            return Err(AllocationError::exhausted(format!("{:?}", self)));
        }
        display.next_handle += 1;
        let handle = DisplayHandle(display.next_handle);
        display.live.insert(handle);
        display.allocations.push(self.clone());
        Ok(handle)
    }

    fn destroy_resource(&self, resource: DisplayHandle, display: &mut RecordingDisplay) {
        assert!(display.live.remove(&resource), "Handle {:?} released twice", resource);
        display.deallocations.push(self.clone());
    }
}

/// Call made by a layer on the manager beneath it
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Call {
    Create(Graphic),
    Destroy(Graphic)
}

/// Forwards to an inner manager, logging every create and destroy it sees
pub struct ProbeManager<M> {
    pub inner: M,
    pub calls: Vec<Call>
}

impl<M: ResourceManager<Graphic>> ProbeManager<M> {

    pub fn new(inner: M) -> Self {
        Self { inner, calls: vec![] }
    }

    pub fn creates(&self) -> usize {
        self.calls.iter().filter(|call| matches!(call, Call::Create(_))).count()
    }

    pub fn destroys(&self) -> usize {
        self.calls.iter().filter(|call| matches!(call, Call::Destroy(_))).count()
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl<M: ResourceManager<Graphic>> ResourceManager<Graphic> for ProbeManager<M> {
    type Resource = M::Resource;

    fn create(&mut self, descriptor: &Graphic) -> Result<M::Resource, AllocationError> {
        self.calls.push(Call::Create(descriptor.clone()));
        self.inner.create(descriptor)
    }

    fn destroy(&mut self, descriptor: &Graphic) {
        self.calls.push(Call::Destroy(descriptor.clone()));
        self.inner.destroy(descriptor)
    }

    fn find(&self, descriptor: &Graphic) -> Option<M::Resource> {
        self.inner.find(descriptor)
    }

    fn dispose(&mut self) {
        self.inner.dispose()
    }

    fn dispose_exec(&mut self, callback: Box<dyn FnOnce()>) -> DisposeToken {
        self.inner.dispose_exec(callback)
    }

    fn cancel_dispose_exec(&mut self, token: DisposeToken) -> bool {
        self.inner.cancel_dispose_exec(token)
    }
}
