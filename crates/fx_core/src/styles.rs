use shared::domain::NodeId;

use crate::platform::Env;

/// Rules for notifications, the floating labels, the body fade-in and the
/// hero button pulse.
pub const ADDITIONAL_STYLES: &str = r#"
.notification {
    position: fixed;
    top: 20px;
    right: 20px;
    background: var(--bg-primary);
    color: var(--text-primary);
    padding: 1rem 1.5rem;
    border-radius: 10px;
    box-shadow: var(--shadow-lg);
    border-left: 4px solid var(--primary-color);
    transform: translateX(400px);
    transition: all 0.3s ease;
    z-index: 10000;
    display: flex;
    align-items: center;
    gap: 0.5rem;
}

.notification.success {
    border-left-color: #10B981;
}

.notification.success i {
    color: #10B981;
}

.notification.show {
    transform: translateX(0);
}

body.loaded {
    opacity: 1;
}

body {
    opacity: 0;
    transition: opacity 0.5s ease;
}

.form-group.focused label {
    top: -0.5rem;
    font-size: 0.8rem;
    color: var(--primary-color);
}

@keyframes pulse {
    0% { transform: scale(1); }
    50% { transform: scale(1.05); }
    100% { transform: scale(1); }
}

.hero-buttons .btn:hover {
    animation: pulse 0.5s ease;
}
"#;

pub fn inject_styles(env: &mut Env<'_>) -> NodeId {
    let style = env.dom.create_element("style");
    env.dom.set_text(style, ADDITIONAL_STYLES);
    let head = env.dom.head();
    env.dom.append_child(head, style);
    style
}
