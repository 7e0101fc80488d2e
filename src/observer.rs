//! Observer contract between the field group and its host.
//!
//! The host implements [`OtpFieldObserver`] and hands the group a [`Weak`]
//! reference; the group never owns the observer and keeps working when the
//! host drops it. All callbacks run synchronously inside the keystroke
//! handler - an observer must not trigger a new edit on the same group from
//! within a callback (re-entrant mutation is not guarded against).
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use otp_field::observer::OtpFieldObserver;
//!
//! struct Host;
//!
//! impl OtpFieldObserver for Host {
//!     fn on_otp_entered(&self, otp: &str) {
//!         println!("entered: {otp}");
//!     }
//! }
//!
//! let host: Rc<dyn OtpFieldObserver> = Rc::new(Host);
//! let weak = Rc::downgrade(&host);
//! # let _ = weak;
//! ```

use std::rc::Weak;

/// Host-side observer of a field group.
///
/// Every method has a permissive default, so a host only implements what it
/// cares about.
pub trait OtpFieldObserver {
    /// Gate for focus transfer into `index`. Deny to keep the slot inactive.
    fn can_activate_slot(&self, index: usize) -> bool {
        let _ = index;
        true
    }

    /// Fired exactly once per completed entry with the composed value.
    fn on_otp_entered(&self, otp: &str) {
        let _ = otp;
    }

    /// Called right after [`Self::on_otp_entered`] with `true`, and with
    /// `false` on every deletion that breaks a complete entry. The return
    /// value decides success vs error coloring.
    fn on_completion_validated(&self, all_entered: bool) -> bool {
        all_entered
    }
}

/// Non-owning observer handle as stored by the group.
pub type ObserverHandle = Weak<dyn OtpFieldObserver>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    struct Silent;
    impl OtpFieldObserver for Silent {}

    #[test]
    fn test_default_gate_is_permissive() {
        let obs = Silent;
        assert!(obs.can_activate_slot(0));
        assert!(obs.can_activate_slot(42));
    }

    #[test]
    fn test_default_verdict_echoes_completion() {
        let obs = Silent;
        assert!(obs.on_completion_validated(true));
        assert!(!obs.on_completion_validated(false));
    }

    #[test]
    fn test_handle_upgrades_while_host_lives() {
        let host: Rc<dyn OtpFieldObserver> = Rc::new(Silent);
        let handle: ObserverHandle = Rc::downgrade(&host);
        assert!(handle.upgrade().is_some());

        drop(host);
        assert!(handle.upgrade().is_none());
    }
}
