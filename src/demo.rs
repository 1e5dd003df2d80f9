//! Sample page and demo flow
//!
//! Builds a small synthetic page (utility-classed layout, one
//! framework-backed card, a couple of deliberate accessibility problems)
//! and drives the engine through a full hover → activate → inspect pass.

use std::time::Instant;

use serde_json::json;

use vibe_core::prelude::*;
use vibe_core::{Point, Rect, Viewport};
use vibe_engine::{SettingsUpdate, VibeModeManager};
use vibe_host::{ComputedStyle, Document, FiberNode, HostEvent, NodeId};

/// What the CLI asked the demo to do.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    /// Analysis level name (validated by the manager).
    pub level: String,
    /// `id` attribute of the element to inspect.
    pub element_id: String,
    /// Emit the full state snapshot as JSON instead of a summary.
    pub json: bool,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            level: "detailed".to_string(),
            element_id: "pricing-card".to_string(),
            json: false,
        }
    }
}

/// Build the demo page. Returns the document and the ids of its
/// inspectable landmarks, in tree order.
pub fn sample_page() -> (Document, Vec<NodeId>) {
    let mut doc = Document::new();
    doc.set_viewport(Viewport::new(1280.0, 720.0));
    let root = doc.root();

    let header = doc.create_element("header");
    doc.set_attribute(header, "id", "site-header");
    doc.set_classes(header, &["flex", "justify-between", "p-4", "bg-white", "shadow-sm"]);
    doc.set_rect(header, Rect::new(0.0, 0.0, 1280.0, 64.0));
    doc.set_computed_style(header, ComputedStyle::with_display("flex"));
    doc.append_child(root, header);

    let brand = doc.create_element("a");
    doc.set_attribute(brand, "href", "/");
    doc.set_classes(brand, &["font-bold", "text-xl", "text-gray-900"]);
    doc.set_rect(brand, Rect::new(16.0, 16.0, 120.0, 32.0));
    let brand_text = doc.create_text("Briefify");
    doc.append_child(header, brand);
    doc.append_child(brand, brand_text);

    let main = doc.create_element("main");
    doc.set_classes(main, &["mx-auto", "max-w-prose", "p-8"]);
    doc.set_rect(main, Rect::new(160.0, 64.0, 960.0, 600.0));
    doc.append_child(root, main);

    // Framework-backed pricing card with a hook and props.
    let card = doc.create_element("section");
    doc.set_attribute(card, "id", "pricing-card");
    doc.set_classes(
        card,
        &["p-4", "bg-blue-500", "sm:flex", "rounded-xl", "shadow-lg", "text-white"],
    );
    doc.set_rect(card, Rect::new(200.0, 120.0, 400.0, 220.0));
    doc.set_computed_style(card, {
        let mut style = ComputedStyle::with_display("flex");
        style.set("position", "relative");
        style.set("color", "rgb(255, 255, 255)");
        style.set("background-color", "rgb(59, 130, 246)");
        style
    });
    doc.append_child(main, card);

    let mut props = serde_json::Map::new();
    props.insert("plan".to_string(), json!("pro"));
    props.insert("highlighted".to_string(), json!(true));
    let owner = doc.fibers_mut().add(
        FiberNode::function("PricingCard")
            .with_props(props)
            .with_hooks(vec![json!(false), json!({ "billing": "monthly" })]),
    );
    let host_fiber = doc.fibers_mut().add(FiberNode::host("section"));
    doc.fibers_mut().link_return(host_fiber, owner);
    doc.fibers_mut().link_child(owner, host_fiber);
    doc.attach_fiber(card, host_fiber);

    let title = doc.create_element("h2");
    doc.set_classes(title, &["text-2xl", "font-bold", "mb-2"]);
    doc.set_rect(title, Rect::new(216.0, 136.0, 368.0, 32.0));
    let title_text = doc.create_text("Pro plan");
    doc.append_child(card, title);
    doc.append_child(title, title_text);

    // Deliberate accessibility problems for the audit tab.
    let figure = doc.create_element("img");
    doc.set_attribute(figure, "id", "team-photo");
    doc.set_attribute(figure, "src", "/team.png");
    doc.set_rect(figure, Rect::new(200.0, 380.0, 400.0, 160.0));
    doc.append_child(main, figure);

    let newsletter = doc.create_element("input");
    doc.set_attribute(newsletter, "id", "newsletter-email");
    doc.set_attribute(newsletter, "type", "email");
    doc.set_rect(newsletter, Rect::new(200.0, 560.0, 280.0, 36.0));
    doc.append_child(main, newsletter);

    (doc, vec![header, brand, main, card, title, figure, newsletter])
}

/// Run the full demo pass: enable, hover the element, activate the icon,
/// print the resulting state.
pub async fn run_demo(options: DemoOptions) -> Result<()> {
    let (mut doc, _landmarks) = sample_page();

    let target = doc
        .element_by_id(&options.element_id)
        .ok_or_else(|| Error::invalid_target(format!("no element #{}", options.element_id)))?;

    let mut manager = VibeModeManager::new();
    manager.update_settings(SettingsUpdate::analysis_level(&options.level))?;
    manager.subscribe(|state| {
        trace!(
            "state: enabled={} hovered={:?} popup={}",
            state.is_enabled,
            state.hovered_element,
            state.active_popup.is_some()
        );
    });

    manager.enable(&mut doc);

    // Hover the target and let the debounce window elapse.
    let rect = doc.rect(target);
    let inside = Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
    let t0 = Instant::now();
    manager
        .handle_event(&mut doc, HostEvent::pointer_enter(target, inside), t0)
        .await;
    manager
        .handle_event(&mut doc, HostEvent::Tick, t0 + vibe_engine::hover::DEBOUNCE)
        .await;

    // Activate via the icon, as a user would.
    if let Some(icon) = doc.marked_elements(vibe_engine::ICON_MARKER).first() {
        manager
            .handle_event(
                &mut doc,
                HostEvent::Click {
                    target: *icon,
                    position: inside,
                },
                t0 + vibe_engine::hover::DEBOUNCE,
            )
            .await;
    } else {
        manager.show_inspection(&mut doc, target).await?;
    }

    let state = manager.state();
    if options.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    let Some(popup) = &state.active_popup else {
        println!("no popup opened for #{}", options.element_id);
        return Ok(());
    };
    println!(
        "inspected <{}> #{} at {} level ({:?} placement)",
        popup.metadata.element.tag,
        options.element_id,
        popup.metadata.inspection.level,
        popup.position.placement,
    );
    print!("{}", vibe_engine::render_body(&popup.content));
    println!(
        "cache: {}/{} entries, analyses: {}",
        state.cache.entries, state.cache.capacity, state.performance.analysis_count
    );
    Ok(())
}

/// Print the inspectable landmarks of the sample page.
pub fn list_landmarks() {
    let (doc, landmarks) = sample_page();
    for id in landmarks {
        if let Some(node) = doc.get(id) {
            let dom_id = node
                .dom_id()
                .map(|v| format!("#{v}"))
                .unwrap_or_else(|| "(no id)".to_string());
            println!("<{}> {}", node.tag, dom_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_page_landmarks_are_inspectable() {
        let (doc, landmarks) = sample_page();
        for id in landmarks {
            assert!(doc.is_inspectable(id), "{id} should be inspectable");
        }
    }

    #[test]
    fn test_sample_page_has_demo_targets() {
        let (doc, _) = sample_page();
        assert!(doc.element_by_id("pricing-card").is_some());
        assert!(doc.element_by_id("team-photo").is_some());
    }

    #[tokio::test]
    async fn test_run_demo_flows_end_to_end() {
        run_demo(DemoOptions::default()).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_demo_unknown_element_fails() {
        let options = DemoOptions {
            element_id: "nope".to_string(),
            ..Default::default()
        };
        assert!(run_demo(options).await.is_err());
    }
}
