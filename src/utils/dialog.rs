/// Shows a modal error message box, or writes to stderr where there is none.
#[cfg(windows)]
pub fn show_error(title: &str, message: &str) {
	use windows_sys::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_OK};

	let title = wide(title);
	let message = wide(message);
	// SAFETY: both buffers are NUL-terminated and outlive the call.
	unsafe {
		MessageBoxW(std::ptr::null_mut(), message.as_ptr(), title.as_ptr(), MB_OK);
	}
}

#[cfg(not(windows))]
pub fn show_error(title: &str, message: &str) {
	eprintln!("{title}: {message}");
}

#[cfg(windows)]
fn wide(s: &str) -> Vec<u16> {
	s.encode_utf16().chain(std::iter::once(0)).collect()
}
