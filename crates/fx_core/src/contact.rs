//! Contact form: floating labels and a simulated submission with a transient
//! success notification. Nothing is sent over the network.

use std::time::Duration;

use shared::{
    domain::{NodeId, TaskHandle},
    event::Task,
};
use tracing::debug;

use crate::{config::Settings, platform::Env};

pub const CONTACT_FORM: &str = ".contact-form";
pub const FORM_FIELDS: &str = "input, textarea";
pub const SUBMIT_BUTTON: &str = r#"button[type="submit"]"#;
pub const FOCUSED_CLASS: &str = "focused";
pub const NOTIFICATION_CLASS: &str = "notification success";
pub const NOTIFICATION_SHOW_CLASS: &str = "show";
pub const SENDING_LABEL: &str = "Sending...";
pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";

struct Submission {
    form: NodeId,
    button: Option<NodeId>,
    original_label: String,
    timer: TaskHandle,
}

struct Notification {
    node: NodeId,
    timers: Vec<TaskHandle>,
}

pub struct ContactFormManager {
    form: Option<NodeId>,
    submit_delay: Duration,
    enter_delay: Duration,
    display_for: Duration,
    fade_for: Duration,
    in_flight: Option<Submission>,
    notifications: Vec<Notification>,
}

impl ContactFormManager {
    pub fn new(env: &mut Env<'_>, settings: &Settings) -> Self {
        Self {
            form: env.dom.query(CONTACT_FORM),
            submit_delay: settings.submit_delay(),
            enter_delay: Duration::from_millis(settings.notification_enter_ms),
            display_for: Duration::from_millis(settings.notification_display_ms),
            fade_for: Duration::from_millis(settings.notification_fade_ms),
            in_flight: None,
            notifications: Vec::new(),
        }
    }

    pub fn form(&self) -> Option<NodeId> {
        self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Live notifications, oldest first.
    pub fn notifications(&self) -> Vec<NodeId> {
        self.notifications.iter().map(|n| n.node).collect()
    }

    fn field_of_form(&self, env: &mut Env<'_>, target: NodeId) -> bool {
        let Some(form) = self.form else {
            return false;
        };
        env.dom.contains(form, target) && env.dom.closest(target, FORM_FIELDS) == Some(target)
    }

    pub fn handle_focus(&mut self, env: &mut Env<'_>, target: NodeId) {
        if !self.field_of_form(env, target) {
            return;
        }
        if let Some(parent) = env.dom.parent(target) {
            env.dom.add_class(parent, FOCUSED_CLASS);
        }
    }

    /// The label only drops back when the field was left empty.
    pub fn handle_blur(&mut self, env: &mut Env<'_>, target: NodeId) {
        if !self.field_of_form(env, target) || !env.dom.value(target).trim().is_empty() {
            return;
        }
        if let Some(parent) = env.dom.parent(target) {
            env.dom.remove_class(parent, FOCUSED_CLASS);
        }
    }

    /// Returns true when the submission belongs to this form, meaning the
    /// browser's own submission must be suppressed.
    pub fn handle_submit(&mut self, env: &mut Env<'_>, form: NodeId) -> bool {
        if self.form != Some(form) {
            return false;
        }
        if self.in_flight.is_some() {
            debug!("submission already in flight; ignoring");
            return true;
        }

        let data = env.dom.form_data(form);
        debug!(fields = ?data, "contact form submitted");

        let button = env.dom.query_within(form, SUBMIT_BUTTON).into_iter().next();
        let original_label = button.map(|b| env.dom.text(b)).unwrap_or_default();
        if let Some(button) = button {
            env.dom.set_text(button, SENDING_LABEL);
            env.dom.set_disabled(button, true);
        }

        let timer = env
            .scheduler
            .schedule(self.submit_delay, Task::FinishSubmit { form });
        self.in_flight = Some(Submission {
            form,
            button,
            original_label,
            timer,
        });
        true
    }

    pub fn finish_submit(&mut self, env: &mut Env<'_>, form: NodeId) {
        if self.in_flight.as_ref().map(|s| s.form) != Some(form) {
            return;
        }
        let Some(submission) = self.in_flight.take() else {
            return;
        };

        self.show_success(env);
        env.dom.reset_form(submission.form);
        if let Some(button) = submission.button {
            env.dom.set_text(button, &submission.original_label);
            env.dom.set_disabled(button, false);
        }
        debug!("simulated submission finished");
    }

    fn show_success(&mut self, env: &mut Env<'_>) {
        let notification = env.dom.create_element("div");
        env.dom.set_class_name(notification, NOTIFICATION_CLASS);

        let icon = env.dom.create_element("i");
        env.dom.set_class_name(icon, "fas fa-check-circle");
        env.dom.append_child(notification, icon);

        let message = env.dom.create_element("span");
        env.dom.set_text(message, SUCCESS_MESSAGE);
        env.dom.append_child(notification, message);

        let body = env.dom.body();
        env.dom.append_child(body, notification);

        let timers = vec![
            env.scheduler
                .schedule(self.enter_delay, Task::ShowNotification { node: notification }),
            env.scheduler
                .schedule(self.display_for, Task::DismissNotification { node: notification }),
        ];
        self.notifications.push(Notification {
            node: notification,
            timers,
        });
    }

    pub fn show_notification(&mut self, env: &mut Env<'_>, node: NodeId) {
        env.dom.add_class(node, NOTIFICATION_SHOW_CLASS);
    }

    pub fn dismiss_notification(&mut self, env: &mut Env<'_>, node: NodeId) {
        env.dom.remove_class(node, NOTIFICATION_SHOW_CLASS);
        let timer = env
            .scheduler
            .schedule(self.fade_for, Task::RemoveNotification { node });
        if let Some(entry) = self.notifications.iter_mut().find(|n| n.node == node) {
            entry.timers.push(timer);
        }
    }

    pub fn remove_notification(&mut self, env: &mut Env<'_>, node: NodeId) {
        env.dom.remove(node);
        self.notifications.retain(|n| n.node != node);
    }

    /// Cancels the pending submission and every notification timer. Elements
    /// already inserted are left in place.
    pub fn stop(&mut self, env: &mut Env<'_>) {
        if let Some(submission) = self.in_flight.take() {
            env.scheduler.cancel(submission.timer);
        }
        for notification in self.notifications.drain(..) {
            for timer in notification.timers {
                env.scheduler.cancel(timer);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/contact_tests.rs"]
mod tests;
