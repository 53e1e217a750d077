//! Token elevation check. `config`, `start` and `stop` are refused by the
//! service control manager for non-elevated callers.

use tracing::trace;

/// Whether the current process token is elevated. Always `false` off Windows.
#[must_use]
pub fn is_admin() -> bool {
    #[cfg(windows)]
    {
        match token::current_is_elevated() {
            Ok(elevated) => elevated,
            Err(e) => {
                trace!("Token elevation query failed: {}", e);
                false
            }
        }
    }

    #[cfg(not(windows))]
    {
        trace!("No token elevation off Windows");
        false
    }
}

#[cfg(windows)]
mod token {
    use windows::core::Result;
    use windows::Win32::Foundation::{CloseHandle, HANDLE};
    use windows::Win32::Security::{
        GetTokenInformation, TokenElevation, TOKEN_ELEVATION, TOKEN_QUERY,
    };
    use windows::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};

    struct TokenHandle(HANDLE);

    impl Drop for TokenHandle {
        fn drop(&mut self) {
            if !self.0.is_invalid() {
                unsafe {
                    let _ = CloseHandle(self.0);
                }
            }
        }
    }

    impl TokenHandle {
        fn open_current_process() -> Result<Self> {
            let mut handle = HANDLE::default();
            unsafe { OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &raw mut handle)? };
            Ok(Self(handle))
        }

        fn elevation(&self) -> Result<TOKEN_ELEVATION> {
            let mut elevation = TOKEN_ELEVATION::default();
            let mut written = 0u32;
            #[allow(clippy::cast_possible_truncation)]
            let size = std::mem::size_of::<TOKEN_ELEVATION>() as u32;
            unsafe {
                GetTokenInformation(
                    self.0,
                    TokenElevation,
                    Some((&raw mut elevation).cast()),
                    size,
                    &raw mut written,
                )?;
            }
            Ok(elevation)
        }
    }

    pub(super) fn current_is_elevated() -> Result<bool> {
        let token = TokenHandle::open_current_process()?;
        Ok(token.elevation()?.TokenIsElevated != 0)
    }
}
