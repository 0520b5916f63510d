//! Platform-specific glue.

/// Check whether the named keyboard layout is active.
#[cfg(target_os = "linux")]
pub(crate) fn layout_is_active(layout_name: &str) -> bool {
    use std::process::Command;

    let Ok(output) = Command::new("localectl").arg("status").output() else {
        return false;
    };
    output.status.success()
        && String::from_utf8_lossy(&output.stdout)
            .lines()
            .any(|line| line.contains(layout_name))
}

#[cfg(not(target_os = "linux"))]
pub(crate) fn layout_is_active(_layout_name: &str) -> bool {
    // XXX: Not implemented for Windows or OS X.
    false
}

/// Set up a platform-specific special panic handler if necessary.
///
/// A Windows GUI executable has no console to print the panic message on,
/// so on Windows panics are shown in an error dialog box instead.
#[cfg(target_os = "windows")]
pub fn panic_handler() {
    use winapi::um::winuser::{MessageBoxW, MB_ICONERROR};

    fn wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(Some(0)).collect()
    }

    std::panic::set_hook(Box::new(|panic_info| {
        let message = wide(&panic_info.to_string());
        let caption = wide("Error");
        unsafe {
            MessageBoxW(
                std::ptr::null_mut(),
                message.as_ptr(),
                caption.as_ptr(),
                MB_ICONERROR,
            );
        }
    }));
}

#[cfg(not(target_os = "windows"))]
pub fn panic_handler() {}
