// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn new_guest_defaults_to_standalone_role_and_no_capabilities() {
    let guest = Guest::new(GuestId::new("g1"), "default");
    assert_eq!(guest.role, GuestRole::Standalone);
    assert_eq!(guest.capabilities, GuestCapabilities::default());
    assert_eq!(guest.name, "default");
}

#[test]
fn builder_methods_set_role_and_capabilities() {
    let guest = Guest::new(GuestId::new("g1"), "server")
        .with_role(GuestRole::Server)
        .with_capabilities(GuestCapabilities {
            can_reboot: true,
            can_push_workdir: true,
        });
    assert_eq!(guest.role, GuestRole::Server);
    assert!(guest.capabilities.can_reboot);
    assert!(guest.capabilities.can_push_workdir);
}

#[test]
fn guest_id_short_truncates() {
    let id = GuestId::new("0123456789abcdef");
    assert_eq!(id.short(8), "01234567");
}
