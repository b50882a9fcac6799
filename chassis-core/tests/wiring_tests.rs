// Tests for post-registration dependency resolution

use std::sync::Arc;

use chassis_core::component::downcast;
use chassis_core::{
    Component, ComponentDescriptor, ComponentView, Container, Dependency, Instantiated, Role,
};

trait Notifier: Send + Sync {
    fn channel(&self) -> &'static str;
}

trait Metrics: Send + Sync {}

#[derive(Default)]
struct EmailNotifier;

impl Component for EmailNotifier {}

impl Notifier for EmailNotifier {
    fn channel(&self) -> &'static str {
        "email"
    }
}

#[derive(Default)]
struct SmsNotifier;

impl Component for SmsNotifier {}

impl Notifier for SmsNotifier {
    fn channel(&self) -> &'static str {
        "sms"
    }
}

#[derive(Default)]
struct OrderService {
    /// Resolved by declared-type key.
    notifier: Dependency<dyn Notifier>,
    /// Resolved by explicit qualifier, concrete-typed.
    backup: Dependency<SmsNotifier>,
    /// Resolved by qualifier naming the implementor's canonical key.
    escalation: Dependency<dyn Notifier>,
    /// Qualifier resolves, but the entry declares no matching capability.
    fallback: Dependency<dyn Notifier>,
    /// No provider anywhere.
    metrics: Dependency<dyn Metrics>,
}

impl Component for OrderService {}

fn leak(descriptor: ComponentDescriptor) -> &'static ComponentDescriptor {
    Box::leak(Box::new(descriptor))
}

fn email_descriptor() -> ComponentDescriptor {
    ComponentDescriptor::new("acme::EmailNotifier", || Ok(Instantiated::of(EmailNotifier)))
        .role(Role::Service)
        .implements("acme::Notifier", |concrete| {
            let service = concrete.downcast_ref::<Arc<EmailNotifier>>()?;
            let capability: Arc<dyn Notifier> = service.clone();
            let view: ComponentView = Arc::new(capability);
            Some(view)
        })
}

// Implements `Notifier` in Rust terms but deliberately declares no
// capability binding, so trait-typed slots cannot be filled from it.
fn sms_descriptor() -> ComponentDescriptor {
    ComponentDescriptor::new("acme::SmsNotifier", || Ok(Instantiated::of(SmsNotifier)))
        .role(Role::Service)
        .alias("sms")
}

fn order_descriptor() -> ComponentDescriptor {
    ComponentDescriptor::new("acme::OrderService", || Ok(Instantiated::of(OrderService::default())))
        .role(Role::Service)
        .wires("notifier", None, "acme::Notifier", |target, entry| {
            let Some(order) = downcast::<OrderService>(target) else {
                return false;
            };
            match entry.extract::<dyn Notifier>() {
                Some(value) => {
                    order.notifier.fill(value);
                    true
                }
                None => false,
            }
        })
        .wires("backup", Some("sms"), "acme::SmsNotifier", |target, entry| {
            let Some(order) = downcast::<OrderService>(target) else {
                return false;
            };
            match entry.extract::<SmsNotifier>() {
                Some(value) => {
                    order.backup.fill(value);
                    true
                }
                None => false,
            }
        })
        .wires(
            "escalation",
            Some("emailNotifier"),
            "acme::Notifier",
            |target, entry| {
                let Some(order) = downcast::<OrderService>(target) else {
                    return false;
                };
                match entry.extract::<dyn Notifier>() {
                    Some(value) => {
                        order.escalation.fill(value);
                        true
                    }
                    None => false,
                }
            },
        )
        .wires("fallback", Some("sms"), "acme::Notifier", |target, entry| {
            let Some(order) = downcast::<OrderService>(target) else {
                return false;
            };
            match entry.extract::<dyn Notifier>() {
                Some(value) => {
                    order.fallback.fill(value);
                    true
                }
                None => false,
            }
        })
        .wires("metrics", None, "acme::Metrics", |target, entry| {
            let Some(order) = downcast::<OrderService>(target) else {
                return false;
            };
            match entry.extract::<dyn Metrics>() {
                Some(value) => {
                    order.metrics.fill(value);
                    true
                }
                None => false,
            }
        })
}

fn wired_order_service(container: &Container) -> &OrderService {
    let entry = container.get("orderService").unwrap();
    downcast::<OrderService>(entry.instance.as_ref()).unwrap()
}

fn build_and_wire() -> Container {
    let units = [
        leak(email_descriptor()),
        leak(sms_descriptor()),
        leak(order_descriptor()),
    ];
    let container = Container::build(&units).unwrap();
    chassis_core::wire(&container);
    container
}

#[test]
fn test_slot_resolves_by_declared_type_key() {
    let container = build_and_wire();
    let order = wired_order_service(&container);

    assert_eq!(order.notifier.get().unwrap().channel(), "email");
}

#[test]
fn test_slot_resolves_by_explicit_qualifier() {
    let container = build_and_wire();
    let order = wired_order_service(&container);

    let backup = order.backup.get().unwrap();
    let registered = container.get("sms").unwrap().extract::<SmsNotifier>().unwrap();
    assert!(Arc::ptr_eq(&backup, &registered));
}

#[test]
fn test_qualifier_to_canonical_key_yields_capability_view() {
    let container = build_and_wire();
    let order = wired_order_service(&container);

    assert_eq!(order.escalation.get().unwrap().channel(), "email");
}

#[test]
fn test_undeclared_capability_leaves_slot_empty() {
    let container = build_and_wire();
    let order = wired_order_service(&container);

    assert!(!order.fallback.is_filled());
}

#[test]
fn test_missing_provider_leaves_slot_empty() {
    let container = build_and_wire();
    let order = wired_order_service(&container);

    assert!(!order.metrics.is_filled());
}

#[test]
fn test_wiring_is_tolerant_of_gaps() {
    // A container with only the consumer: every slot misses, nothing fails.
    let units = [leak(order_descriptor())];
    let container = Container::build(&units).unwrap();
    chassis_core::wire(&container);

    let order = wired_order_service(&container);
    assert!(!order.notifier.is_filled());
    assert!(!order.backup.is_filled());
    assert!(!order.metrics.is_filled());
}
