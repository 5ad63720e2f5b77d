/// Команды клавиатуры редактора.
///
/// Ядро даёт только примитивы `next`/`previous`/`save`; «сохранить, если
/// есть изменения, и перейти» собирается на уровне UI из этих команд.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    SaveAndStay,
    SaveAndNext,
    SaveAndPrevious,
    Next,
    Previous,
}

impl EditorCommand {
    /// Ctrl/⌘+Enter: сохранить; Ctrl/⌘+↓/↑: перейти, предварительно
    /// сохранив черновик, если он изменён
    pub fn from_shortcut(ctrl_or_meta: bool, key: &str, dirty: bool) -> Option<Self> {
        if !ctrl_or_meta {
            return None;
        }
        match key {
            "Enter" => Some(EditorCommand::SaveAndStay),
            "ArrowDown" if dirty => Some(EditorCommand::SaveAndNext),
            "ArrowDown" => Some(EditorCommand::Next),
            "ArrowUp" if dirty => Some(EditorCommand::SaveAndPrevious),
            "ArrowUp" => Some(EditorCommand::Previous),
            _ => None,
        }
    }

    pub fn saves(&self) -> bool {
        matches!(
            self,
            EditorCommand::SaveAndStay | EditorCommand::SaveAndNext | EditorCommand::SaveAndPrevious
        )
    }
}
