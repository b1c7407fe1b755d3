use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    List,
    Reply,
    Compose,
}

impl Screen {
    /// Push a child screen. Only the list can open one, and only children can be opened.
    pub fn open(self, target: Screen) -> Result<Screen, ClientError> {
        match (self, target) {
            (Screen::List, Screen::Reply | Screen::Compose) => Ok(target),
            _ => Err(ClientError::Precondition(format!(
                "cannot open {target:?} from {self:?}"
            ))),
        }
    }

    /// Children always return to the list.
    pub fn back(self) -> Screen {
        Screen::List
    }

    pub fn is_form(self) -> bool {
        matches!(self, Screen::Reply | Screen::Compose)
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::List => "Inbox",
            Screen::Reply => "Reply",
            Screen::Compose => "Compose Email",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_opens_children() {
        assert_eq!(Screen::List.open(Screen::Reply).unwrap(), Screen::Reply);
        assert_eq!(Screen::List.open(Screen::Compose).unwrap(), Screen::Compose);
    }

    #[test]
    fn no_nested_or_self_transitions() {
        assert!(Screen::Reply.open(Screen::Compose).is_err());
        assert!(Screen::Compose.open(Screen::Reply).is_err());
        assert!(Screen::Compose.open(Screen::Compose).is_err());
        assert!(Screen::List.open(Screen::List).is_err());
    }

    #[test]
    fn children_return_to_list() {
        assert_eq!(Screen::Reply.back(), Screen::List);
        assert_eq!(Screen::Compose.back(), Screen::List);
        assert!(!Screen::List.is_form());
    }
}
