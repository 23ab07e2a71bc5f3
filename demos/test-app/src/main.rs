
use anyhow::Result;
use error::AllocationError;
use log::{info, warn};
use resource::{
    DeviceDescriptor, DeviceResourceManager, LazyEvictionManager, ManagerConfig,
    ResourceDescriptor, ResourceManager, ScopedManager
};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Upper bound on handles the pretend display can hold at once
const DISPLAY_HANDLE_LIMIT: usize = 64;

/// Display struct
/// Stand-in for a windowing system's display connection; hands out numbered handles and keeps
/// track of how many are live.
#[derive(Default)]
struct Display {
    next_handle: u64,
    live_handles: usize,
    total_allocations: usize
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct OsHandle(u64);

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
enum Graphic {
    Color(u8, u8, u8),
    Font { name: &'static str, height: u32 },
    // Large one-off images are not worth keeping around once released
    Image { path: &'static str, one_off: bool }
}

impl ResourceDescriptor for Graphic {
    fn cacheable(&self) -> bool {
        !matches!(self, Graphic::Image { one_off: true, .. })
    }
}

impl DeviceDescriptor<Display> for Graphic {
    type Resource = OsHandle;

    fn create_resource(&self, display: &mut Display) -> Result<OsHandle, AllocationError> {
        if display.live_handles >= DISPLAY_HANDLE_LIMIT {
            return Err(AllocationError::exhausted("display handle limit reached"));
        }
        display.next_handle += 1;
        display.live_handles += 1;
        display.total_allocations += 1;
        Ok(OsHandle(display.next_handle))
    }

    fn destroy_resource(&self, resource: OsHandle, display: &mut Display) {
        if display.live_handles == 0 {
            warn!("Display released {:?} with no live handles", resource);
            return;
        }
        display.live_handles -= 1;
    }
}

fn load_config() -> Result<ManagerConfig> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "manager.toml".to_string());
    let path = Path::new(&path);
    if !path.exists() {
        info!("No config at {}, using defaults", path.display());
        return Ok(ManagerConfig::default());
    }
    Ok(ManagerConfig::from_toml_file(path)?)
}

// Opens a short-lived dialog that needs a handful of resources, then closes it
fn open_dialog<P: ResourceManager<Graphic>>(parent: P) -> Result<()> {
    let mut dialog: ScopedManager<Graphic, P> = ScopedManager::scoped(parent);
    dialog.create(&Graphic::Color(240, 240, 240))?;
    dialog.create(&Graphic::Color(0, 0, 0))?;
    dialog.create(&Graphic::Font { name: "Sans", height: 11 })?;
    dialog.create(&Graphic::Image { path: "banner.png", one_off: true })?;
    dialog.dispose();
    Ok(())
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    info!("Lazy cache capacity {}", config.cache_capacity);

    let root: Rc<RefCell<DeviceResourceManager<Graphic, Display>>> =
        Rc::new(RefCell::new(DeviceResourceManager::for_device(Display::default())));
    let lazy: Rc<RefCell<LazyEvictionManager<Graphic, _>>> =
        Rc::new(RefCell::new(LazyEvictionManager::with_config(Rc::clone(&root), &config)));

    for round in 1..=3 {
        open_dialog(Rc::clone(&lazy))?;
        let display_allocations = root.borrow().device().total_allocations;
        info!(
            "After dialog {}: {} allocations so far, {} parked",
            round,
            display_allocations,
            lazy.borrow().cached_count());
    }

    lazy.borrow_mut().dispose();
    root.borrow_mut().dispose();
    info!("Live handles after teardown: {}", root.borrow().device().live_handles);
    Ok(())
}
