use crate::mail::compose::{BODY_SEGMENTS, DraftFields};

/// Focusable slots of the compose/reply form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slot {
    #[default]
    To,
    Subject,
    Body(usize),
    SendButton,
    CancelButton,
}

impl Slot {
    const ORDER: [Slot; 8] = [
        Slot::To,
        Slot::Subject,
        Slot::Body(0),
        Slot::Body(1),
        Slot::Body(2),
        Slot::Body(3),
        Slot::SendButton,
        Slot::CancelButton,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn is_button(self) -> bool {
        matches!(self, Slot::SendButton | Slot::CancelButton)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Escape,
}

#[derive(Debug, Clone, Default)]
pub struct Form {
    pub fields: DraftFields,
    pub focus: Slot,
}

impl Form {
    pub fn clear(&mut self) {
        self.fields.clear();
        self.focus = Slot::default();
    }

    pub fn focus_next(&mut self) {
        let i = (self.focus.index() + 1) % Slot::ORDER.len();
        self.focus = Slot::ORDER[i];
    }

    pub fn focus_prev(&mut self) {
        let n = Slot::ORDER.len();
        let i = (self.focus.index() + n - 1) % n;
        self.focus = Slot::ORDER[i];
    }

    pub fn field(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::To => Some(&self.fields.to),
            Slot::Subject => Some(&self.fields.subject),
            Slot::Body(i) if i < BODY_SEGMENTS => Some(&self.fields.body[i]),
            _ => None,
        }
    }

    fn focused_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Slot::To => Some(&mut self.fields.to),
            Slot::Subject => Some(&mut self.fields.subject),
            Slot::Body(i) if i < BODY_SEGMENTS => Some(&mut self.fields.body[i]),
            _ => None,
        }
    }

    pub fn input(&mut self, c: char) {
        if let Some(f) = self.focused_field_mut() {
            f.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(f) = self.focused_field_mut() {
            f.pop();
        }
    }

    /// Enter: buttons fire, fields move focus on.
    pub fn activate(&mut self) -> FormAction {
        match self.focus {
            Slot::SendButton => FormAction::Submit,
            Slot::CancelButton => FormAction::Escape,
            _ => {
                self.focus_next();
                FormAction::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_goes_to_focused_field() {
        let mut f = Form::default();
        for c in "a@x.com".chars() {
            f.input(c);
        }
        f.focus_next();
        f.input('H');
        f.input('i');
        f.backspace();
        assert_eq!(f.fields.to, "a@x.com");
        assert_eq!(f.fields.subject, "H");
    }

    #[test]
    fn focus_cycles_through_buttons() {
        let mut f = Form::default();
        for _ in 0..6 {
            f.focus_next();
        }
        assert_eq!(f.focus, Slot::SendButton);
        f.input('x');
        assert!(f.fields.body.iter().all(String::is_empty));
        f.focus_next();
        f.focus_next();
        assert_eq!(f.focus, Slot::To);
        f.focus_prev();
        assert_eq!(f.focus, Slot::CancelButton);
    }

    #[test]
    fn enter_fires_buttons_only() {
        let mut f = Form::default();
        assert!(matches!(f.activate(), FormAction::None));
        assert_eq!(f.focus, Slot::Subject);
        f.focus = Slot::SendButton;
        assert!(matches!(f.activate(), FormAction::Submit));
        f.focus = Slot::CancelButton;
        assert!(matches!(f.activate(), FormAction::Escape));
    }

    #[test]
    fn clear_resets_everything() {
        let mut f = Form::default();
        f.input('z');
        f.focus = Slot::Body(2);
        f.clear();
        assert_eq!(f.fields, DraftFields::default());
        assert_eq!(f.focus, Slot::To);
    }
}
