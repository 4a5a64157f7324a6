/// Grab a read guard on an RwLock, recovering the data if the lock is poisoned
#[macro_export]
macro_rules! lockr {
    ($lock:expr) => {
        match $lock.read() {
            Ok(x) => x,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Grab a write guard on an RwLock, recovering the data if the lock is poisoned
#[macro_export]
macro_rules! lockw {
    ($lock:expr) => {
        match $lock.write() {
            Ok(x) => x,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
