use std::rc::Rc;

use collapsible::prelude::*;
use collapsible::widgets::collapsible::{
    CSS_VAR_COLLAPSIBLE_HEIGHT, CSS_VAR_COLLAPSIBLE_TRANSITION_DELAY,
    CSS_VAR_COLLAPSIBLE_TRANSITION_DURATION,
};

fn print_state(label: &str, host: &HeadlessElement) {
    let read = |name: &str| host.style_property(name).unwrap_or_default();
    println!(
        "{label:<16} aria-hidden={:<5} class={:<18} height={:<8} duration={:<12} delay={}",
        host.attribute("aria-hidden").unwrap_or_default(),
        host.attribute("class").unwrap_or_default(),
        read(CSS_VAR_COLLAPSIBLE_HEIGHT),
        read(CSS_VAR_COLLAPSIBLE_TRANSITION_DURATION),
        read(CSS_VAR_COLLAPSIBLE_TRANSITION_DELAY),
    );
}

fn main() {
    let host = Rc::new(HeadlessElement::new().width(360.0));
    let expanded = create_signal(false);

    let (mut details, scope) = AppProvider::new().run(|| {
        let mut details = Collapsible::new("shipping-details")
            .open(expanded.clone())
            .child(text("Ships from the Montreal warehouse"))
            .child(column(vec![block(120.0).into_child(), block(80.0).into_child()]).spacing(12.0));
        details.mount(host.clone());
        details
    });
    print_state("mounted", &host);

    expanded.set(true);
    print_state("expanded", &host);

    host.resize_content(720.0);
    print_state("content grew", &host);

    details.set_children([text("Tracking number pending")]);
    print_state("children swapped", &host);

    scope.theme().update(|theme| theme.easing = TimingFunction::EaseOut);
    print_state("ease-out theme", &host);

    expanded.set(false);
    print_state("collapsed", &host);

    details.unmount();
    println!("resize listeners after unmount: {}", host.listener_count());
}
