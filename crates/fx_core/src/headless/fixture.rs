use shared::domain::NodeId;

use super::dom::MemoryDom;
use crate::platform::Dom;

/// Section ids in document order with their (offset_top, offset_height).
pub const SECTIONS: [(&str, f64, f64); 6] = [
    ("home", 0.0, 800.0),
    ("about", 800.0, 600.0),
    ("skills", 1400.0, 700.0),
    ("experience", 2100.0, 800.0),
    ("projects", 2900.0, 900.0),
    ("contact", 3800.0, 700.0),
];

pub const NAVBAR_HEIGHT: f64 = 70.0;

/// The portfolio markup every controller expects, with a plausible layout.
pub fn portfolio_document() -> MemoryDom {
    let mut dom = MemoryDom::new();
    let body = dom.body();

    build_navbar(&mut dom, body);

    let sections: Vec<NodeId> = SECTIONS
        .iter()
        .map(|(id, top, height)| {
            let section = dom.append_element(body, "section", &[("id", id)]);
            dom.set_layout(section, *top, *height);
            section
        })
        .collect();

    build_hero(&mut dom, sections[0]);
    build_about(&mut dom, sections[1]);
    build_skills(&mut dom, sections[2]);
    build_experience(&mut dom, sections[3]);
    build_projects(&mut dom, sections[4]);
    build_contact(&mut dom, sections[5]);

    dom.append_text_element(body, "footer", &[("class", "footer")], "Made with care");
    dom
}

fn build_navbar(dom: &mut MemoryDom, body: NodeId) {
    let navbar = dom.append_element(body, "nav", &[("class", "navbar")]);
    dom.set_layout(navbar, 0.0, NAVBAR_HEIGHT);
    let container = dom.append_element(navbar, "div", &[("class", "nav-container")]);
    dom.append_text_element(container, "a", &[("class", "nav-logo"), ("href", "#home")], "Alex");

    let menu = dom.append_element(container, "ul", &[("class", "nav-menu")]);
    for (id, label) in [
        ("home", "Home"),
        ("about", "About"),
        ("skills", "Skills"),
        ("experience", "Experience"),
        ("projects", "Projects"),
        ("contact", "Contact"),
    ] {
        let item = dom.append_element(menu, "li", &[("class", "nav-item")]);
        let href = format!("#{id}");
        dom.append_text_element(item, "a", &[("class", "nav-link"), ("href", &href)], label);
    }

    let toggle = dom.append_element(
        container,
        "button",
        &[("id", "theme-toggle"), ("class", "theme-toggle")],
    );
    dom.append_element(toggle, "i", &[("class", "fas fa-moon")]);

    let hamburger = dom.append_element(container, "div", &[("class", "hamburger")]);
    for _ in 0..3 {
        dom.append_element(hamburger, "span", &[("class", "bar")]);
    }
}

fn build_hero(dom: &mut MemoryDom, section: NodeId) {
    let container = dom.append_element(section, "div", &[("class", "hero-container")]);
    let text = dom.append_element(container, "div", &[("class", "hero-text")]);
    dom.append_text_element(text, "h1", &[("class", "hero-title")], "Hi, I'm Alex");
    dom.append_element(text, "p", &[("class", "hero-subtitle")]);
    dom.append_text_element(
        text,
        "p",
        &[("class", "hero-description")],
        "I build things for the web.",
    );
    let buttons = dom.append_element(text, "div", &[("class", "hero-buttons")]);
    dom.append_text_element(
        buttons,
        "a",
        &[("class", "btn btn-primary"), ("href", "#projects")],
        "View My Work",
    );
    dom.append_text_element(
        buttons,
        "a",
        &[("class", "btn btn-secondary"), ("href", "#contact")],
        "Get In Touch",
    );

    let image = dom.append_element(container, "div", &[("class", "hero-image")]);
    let card = dom.append_element(image, "div", &[("class", "profile-card")]);
    dom.append_element(card, "img", &[("src", "profile.jpg"), ("alt", "Profile")]);

    let shapes = dom.append_element(section, "div", &[("class", "floating-shapes")]);
    for index in 1..=3 {
        let class = format!("shape shape-{index}");
        dom.append_element(shapes, "div", &[("class", &class)]);
    }
}

fn build_about(dom: &mut MemoryDom, section: NodeId) {
    let content = dom.append_element(section, "div", &[("class", "about-content")]);
    let text = dom.append_element(content, "div", &[("class", "about-text")]);
    dom.append_text_element(text, "p", &[], "A developer who enjoys small details.");

    let stats = dom.append_element(content, "div", &[("class", "about-stats")]);
    for (value, label) in [("50+", "Projects"), ("3", "Years"), ("100%", "Commitment")] {
        let stat = dom.append_element(stats, "div", &[("class", "stat")]);
        dom.append_text_element(stat, "h3", &[], value);
        dom.append_text_element(stat, "p", &[], label);
    }

    let hobbies = dom.append_element(content, "div", &[("class", "hobbies")]);
    for hobby in ["Photography", "Hiking", "Chess"] {
        dom.append_text_element(hobbies, "div", &[("class", "hobby-item")], hobby);
    }
}

fn build_skills(dom: &mut MemoryDom, section: NodeId) {
    let grid = dom.append_element(section, "div", &[("class", "skills-grid")]);
    for skills in [&["Rust", "TypeScript", "SQL"][..], &["Figma", "CSS"][..]] {
        let category = dom.append_element(grid, "div", &[("class", "skill-category")]);
        for skill in skills {
            dom.append_text_element(category, "div", &[("class", "skill-item")], skill);
        }
    }
}

fn build_experience(dom: &mut MemoryDom, section: NodeId) {
    let timeline = dom.append_element(section, "div", &[("class", "timeline")]);
    for role in ["Senior Engineer", "Engineer"] {
        dom.append_text_element(timeline, "div", &[("class", "timeline-item")], role);
    }
}

fn build_projects(dom: &mut MemoryDom, section: NodeId) {
    let grid = dom.append_element(section, "div", &[("class", "projects-grid")]);
    for (index, loading) in [None, None, Some("eager")].into_iter().enumerate() {
        let card = dom.append_element(grid, "div", &[("class", "project-card")]);
        let src = format!("project-{index}.png");
        match loading {
            Some(loading) => dom.append_element(card, "img", &[("src", &src), ("loading", loading)]),
            None => dom.append_element(card, "img", &[("src", &src)]),
        };
        let link = format!("#project-{index}");
        dom.append_text_element(card, "a", &[("class", "project-link"), ("href", &link)], "Details");
    }
}

fn build_contact(dom: &mut MemoryDom, section: NodeId) {
    let content = dom.append_element(section, "div", &[("class", "contact-content")]);
    dom.append_text_element(content, "div", &[("class", "contact-info")], "hello@example.com");

    let form = dom.append_element(content, "form", &[("class", "contact-form")]);
    for (name, tag, kind) in [
        ("name", "input", Some("text")),
        ("email", "input", Some("email")),
        ("message", "textarea", None),
    ] {
        let group = dom.append_element(form, "div", &[("class", "form-group")]);
        match kind {
            Some(kind) => dom.append_element(group, tag, &[("name", name), ("type", kind)]),
            None => dom.append_element(group, tag, &[("name", name)]),
        };
        dom.append_text_element(group, "label", &[], name);
    }
    dom.append_text_element(form, "button", &[("type", "submit"), ("class", "btn")], "Send Message");
}
