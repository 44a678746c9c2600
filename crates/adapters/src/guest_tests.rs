// SPDX-License-Identifier: MIT

use super::*;
use crate::local::LocalGuestAdapter;

#[test]
fn guest_adapter_is_object_safe() {
    let adapter: Box<dyn GuestAdapter> = Box::new(LocalGuestAdapter::default());
    let caps = adapter.capabilities("default");
    assert!(!caps.can_reboot);
}
