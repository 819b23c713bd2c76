//! Administrators group membership

use tracing::{trace, warn};
use windows::Win32::Security::{
    AllocateAndInitializeSid, CheckTokenMembership, FreeSid, PSID, SID_IDENTIFIER_AUTHORITY,
};
use windows::core::BOOL;

/// `SECURITY_NT_AUTHORITY`
const SECURITY_NT_AUTHORITY: SID_IDENTIFIER_AUTHORITY =
    SID_IDENTIFIER_AUTHORITY { Value: [0, 0, 0, 0, 0, 5] };
/// `SECURITY_BUILTIN_DOMAIN_RID`
const SECURITY_BUILTIN_DOMAIN_RID: u32 = 0x0000_0020;
/// `DOMAIN_ALIAS_RID_ADMINS`
const DOMAIN_ALIAS_RID_ADMINS: u32 = 0x0000_0220;

/// SID allocated by `AllocateAndInitializeSid`, freed on drop
struct AllocatedSid(PSID);

impl Drop for AllocatedSid {
    fn drop(&mut self) {
        unsafe {
            let _ = FreeSid(self.0);
        }
    }
}

/// Whether the current process token is a member of `S-1-5-32-544`.
///
/// Any failure to build the SID or query membership counts as not elevated.
pub(super) fn is_admin() -> bool {
    let mut sid = PSID::default();
    let allocated = unsafe {
        AllocateAndInitializeSid(
            &SECURITY_NT_AUTHORITY,
            2,
            SECURITY_BUILTIN_DOMAIN_RID,
            DOMAIN_ALIAS_RID_ADMINS,
            0,
            0,
            0,
            0,
            0,
            0,
            &mut sid,
        )
    };
    if let Err(e) = allocated {
        warn!(error = %e, "AllocateAndInitializeSid failed; treating process as not elevated");
        return false;
    }
    let admins = AllocatedSid(sid);

    let mut is_member = BOOL::default();
    match unsafe { CheckTokenMembership(None, admins.0, &mut is_member) } {
        Ok(()) => {
            trace!(is_member = is_member.as_bool(), "Checked administrators group membership");
            is_member.as_bool()
        }
        Err(e) => {
            warn!(error = %e, "CheckTokenMembership failed; treating process as not elevated");
            false
        }
    }
}
