//! Notes and checklists with a single active selection.
//!
//! A note carries both a free-text `content` and a `checklist`; `kind` decides which one is the
//! active payload. Converting between kinds is lossy on purpose: blank lines and completion
//! state are dropped.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::model::EntityId;

pub const UNTITLED_NOTE_TITLE: &str = "Untitled Note";
const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    #[default]
    Note,
    Checklist,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: EntityId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl ChecklistItem {
    fn new(text: impl Into<String>) -> Self {
        Self {
            id: EntityId::generate(),
            text: text.into(),
            completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: EntityId,
    #[serde(rename = "type", default)]
    pub kind: NoteKind,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Splits note text into unchecked items, one per non-blank line.
pub fn content_to_checklist(content: &str) -> Vec<ChecklistItem> {
    content
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(ChecklistItem::new)
        .collect()
}

/// Joins item texts with newlines; completion state is not kept.
pub fn checklist_to_content(items: &[ChecklistItem]) -> String {
    items
        .iter()
        .map(|item| item.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotesState {
    /// Newest first.
    notes: Vec<Note>,
    selected: Option<EntityId>,
    /// Note awaiting delete confirmation.
    pending_delete: Option<EntityId>,
}

impl NotesState {
    pub fn from_notes(notes: Vec<Note>) -> Self {
        Self {
            notes,
            selected: None,
            pending_delete: None,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn selected_id(&self) -> Option<&EntityId> {
        self.selected.as_ref()
    }

    pub fn active(&self) -> Option<&Note> {
        let id = self.selected.as_ref()?;
        self.notes.iter().find(|n| &n.id == id)
    }

    fn active_mut(&mut self) -> Option<&mut Note> {
        let id = self.selected.clone()?;
        self.notes.iter_mut().find(|n| n.id == id)
    }

    pub fn is_delete_pending(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Prepends an empty note and selects it.
    pub fn create(&mut self, now: DateTime<Utc>) -> EntityId {
        let id = EntityId::generate();
        self.notes.insert(
            0,
            Note {
                id: id.clone(),
                kind: NoteKind::Note,
                title: UNTITLED_NOTE_TITLE.to_string(),
                content: String::new(),
                checklist: Vec::new(),
                created_at: now,
                updated_at: now,
            },
        );
        self.selected = Some(id.clone());
        self.pending_delete = None;
        id
    }

    /// Selects an existing note. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: &EntityId) -> bool {
        if !self.notes.iter().any(|n| &n.id == id) {
            return false;
        }
        self.selected = Some(id.clone());
        self.pending_delete = None;
        true
    }

    /// Writes editor fields into the active note. A blank title falls back to the default.
    pub fn save_active(&mut self, title: &str, content: &str, now: DateTime<Utc>) -> bool {
        let Some(note) = self.active_mut() else {
            return false;
        };
        note.title = if title.is_empty() {
            UNTITLED_NOTE_TITLE.to_string()
        } else {
            title.to_string()
        };
        note.content = content.to_string();
        note.updated_at = now;
        true
    }

    /// Switches the active note between note and checklist form.
    pub fn toggle_active_kind(&mut self) -> Option<NoteKind> {
        let note = self.active_mut()?;
        match note.kind {
            NoteKind::Note => {
                note.kind = NoteKind::Checklist;
                if !note.content.trim().is_empty() {
                    note.checklist = content_to_checklist(&note.content);
                }
            }
            NoteKind::Checklist => {
                note.kind = NoteKind::Note;
                note.content = checklist_to_content(&note.checklist);
            }
        }
        Some(note.kind)
    }

    /// Appends a trimmed item to the active note. Blank text is ignored.
    pub fn add_item(&mut self, text: &str, now: DateTime<Utc>) -> Option<EntityId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let note = self.active_mut()?;
        let item = ChecklistItem::new(text);
        let id = item.id.clone();
        note.checklist.push(item);
        note.updated_at = now;
        Some(id)
    }

    pub fn toggle_item(&mut self, item_id: &EntityId, now: DateTime<Utc>) -> bool {
        let Some(note) = self.active_mut() else {
            return false;
        };
        let Some(item) = note.checklist.iter_mut().find(|i| &i.id == item_id) else {
            return false;
        };
        item.completed = !item.completed;
        note.updated_at = now;
        true
    }

    pub fn remove_item(&mut self, item_id: &EntityId, now: DateTime<Utc>) -> bool {
        let Some(note) = self.active_mut() else {
            return false;
        };
        let before = note.checklist.len();
        note.checklist.retain(|i| &i.id != item_id);
        if note.checklist.len() == before {
            return false;
        }
        note.updated_at = now;
        true
    }

    /// Arms the delete confirmation for the active note.
    pub fn request_delete(&mut self) -> bool {
        let Some(id) = self.active().map(|n| n.id.clone()) else {
            return false;
        };
        self.pending_delete = Some(id);
        true
    }

    pub fn cancel_delete(&mut self) -> bool {
        self.pending_delete.take().is_some()
    }

    /// Deletes the note awaiting confirmation and clears the selection.
    pub fn confirm_delete(&mut self) -> Option<Note> {
        let id = self.pending_delete.take()?;
        let index = self.notes.iter().position(|n| n.id == id)?;
        let removed = self.notes.remove(index);
        if self.selected.as_ref() == Some(&id) {
            self.selected = None;
        }
        Some(removed)
    }
}

/// Sidebar preview text for a note.
pub fn note_preview(note: &Note) -> String {
    match note.kind {
        NoteKind::Checklist => {
            let done = note.checklist.iter().filter(|i| i.completed).count();
            format!("{done}/{} completed", note.checklist.len())
        }
        NoteKind::Note => {
            let preview = note.content.chars().take(PREVIEW_CHARS).collect::<String>();
            if preview.is_empty() {
                "No additional text".to_string()
            } else {
                preview
            }
        }
    }
}

/// Relative sidebar date: time today, weekday this week, month and day otherwise.
pub fn format_short_date(updated_at: DateTime<Utc>, now: DateTime<Local>) -> String {
    let local = updated_at.with_timezone(&Local);
    let age_ms = now.timestamp_millis() - updated_at.timestamp_millis();
    if age_ms < 86_400_000 {
        local.format("%I:%M %p").to_string()
    } else if age_ms < 604_800_000 {
        local.format("%a").to_string()
    } else {
        local.format("%b %-d").to_string()
    }
}

/// Editor footer date, e.g. `January 1, 2024 at 09:00 AM`.
pub fn format_long_date(updated_at: DateTime<Utc>) -> String {
    updated_at
        .with_timezone(&Local)
        .format("%B %-d, %Y at %I:%M %p")
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteListEntry {
    pub id: EntityId,
    pub title: String,
    pub kind: NoteKind,
    pub preview: String,
    pub short_date: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteEditorView {
    pub id: EntityId,
    pub kind: NoteKind,
    pub title: String,
    pub content: String,
    pub checklist: Vec<ChecklistItem>,
    pub updated_label: String,
}

pub fn render_note_list(state: &NotesState, now: DateTime<Local>) -> Vec<NoteListEntry> {
    state
        .notes
        .iter()
        .map(|note| NoteListEntry {
            id: note.id.clone(),
            title: note.title.clone(),
            kind: note.kind,
            preview: note_preview(note),
            short_date: format_short_date(note.updated_at, now),
            active: state.selected.as_ref() == Some(&note.id),
        })
        .collect()
}

pub fn render_note_editor(state: &NotesState) -> Option<NoteEditorView> {
    let note = state.active()?;
    Some(NoteEditorView {
        id: note.id.clone(),
        kind: note.kind,
        title: note.title.clone(),
        content: note.content.clone(),
        checklist: note.checklist.clone(),
        updated_label: format_long_date(note.updated_at),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_704_067_200 + secs, 0).single().expect("time")
    }

    fn texts(note: &Note) -> Vec<(&str, bool)> {
        note.checklist
            .iter()
            .map(|i| (i.text.as_str(), i.completed))
            .collect()
    }

    #[test]
    fn create_prepends_and_selects() {
        let mut notes = NotesState::default();
        let first = notes.create(at(0));
        let second = notes.create(at(1));
        assert_eq!(notes.notes()[0].id, second);
        assert_eq!(notes.notes()[1].id, first);
        assert_eq!(notes.selected_id(), Some(&second));
        assert_eq!(notes.active().map(|n| n.title.as_str()), Some("Untitled Note"));
    }

    #[test]
    fn save_updates_active_note_and_defaults_blank_title() {
        let mut notes = NotesState::default();
        notes.create(at(0));
        assert!(notes.save_active("", "body", at(60)));
        let note = notes.active().expect("active");
        assert_eq!(note.title, UNTITLED_NOTE_TITLE);
        assert_eq!(note.content, "body");
        assert_eq!(note.updated_at, at(60));
        assert_eq!(note.created_at, at(0));
    }

    #[test]
    fn operations_without_selection_are_no_ops() {
        let mut notes = NotesState::default();
        assert!(!notes.save_active("t", "c", at(0)));
        assert_eq!(notes.toggle_active_kind(), None);
        assert_eq!(notes.add_item("milk", at(0)), None);
        assert!(!notes.request_delete());
        assert_eq!(notes.confirm_delete(), None);
    }

    #[test]
    fn note_checklist_round_trip_drops_blank_lines() {
        let mut notes = NotesState::default();
        notes.create(at(0));
        notes.save_active("Errands", "buy milk\n\n  \nwalk dog", at(1));

        assert_eq!(notes.toggle_active_kind(), Some(NoteKind::Checklist));
        let note = notes.active().expect("active");
        assert_eq!(texts(note), vec![("buy milk", false), ("walk dog", false)]);

        let first_item = note.checklist[0].id.clone();
        assert!(notes.toggle_item(&first_item, at(2)));

        assert_eq!(notes.toggle_active_kind(), Some(NoteKind::Note));
        assert_eq!(notes.active().expect("active").content, "buy milk\nwalk dog");
    }

    #[test]
    fn blank_content_keeps_existing_checklist() {
        let mut notes = NotesState::default();
        notes.create(at(0));
        notes.toggle_active_kind();
        notes.add_item("keep me", at(1));
        notes.toggle_active_kind();
        notes.save_active("t", "   ", at(2));
        notes.toggle_active_kind();
        assert_eq!(texts(notes.active().expect("active")), vec![("keep me", false)]);
    }

    #[test]
    fn checklist_operations_refresh_updated_at() {
        let mut notes = NotesState::default();
        notes.create(at(0));
        notes.toggle_active_kind();

        assert_eq!(notes.add_item("   ", at(5)), None);
        let item = notes.add_item("  milk  ", at(10)).expect("item");
        assert_eq!(notes.active().expect("active").checklist[0].text, "milk");
        assert_eq!(notes.active().expect("active").updated_at, at(10));

        assert!(notes.toggle_item(&item, at(20)));
        assert!(notes.active().expect("active").checklist[0].completed);
        assert_eq!(notes.active().expect("active").updated_at, at(20));

        assert!(notes.remove_item(&item, at(30)));
        assert!(notes.active().expect("active").checklist.is_empty());
        assert_eq!(notes.active().expect("active").updated_at, at(30));
    }

    #[test]
    fn removing_a_missing_item_leaves_the_note_untouched() {
        let mut notes = NotesState::default();
        notes.create(at(0));
        notes.toggle_active_kind();
        notes.add_item("bread", at(10)).expect("item");
        let before = notes.active().expect("active").clone();

        assert!(!notes.remove_item(&EntityId::from_string("gone"), at(40)));
        assert_eq!(notes.active().expect("active"), &before);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut notes = NotesState::default();
        let keep = notes.create(at(0));
        let doomed = notes.create(at(1));

        assert!(notes.request_delete());
        assert!(notes.cancel_delete());
        assert_eq!(notes.confirm_delete(), None);
        assert_eq!(notes.notes().len(), 2);

        assert!(notes.request_delete());
        let removed = notes.confirm_delete().expect("removed");
        assert_eq!(removed.id, doomed);
        assert_eq!(notes.selected_id(), None);
        assert_eq!(notes.notes().len(), 1);
        assert_eq!(notes.notes()[0].id, keep);
    }

    #[test]
    fn selecting_another_note_disarms_delete() {
        let mut notes = NotesState::default();
        let first = notes.create(at(0));
        notes.create(at(1));
        notes.request_delete();
        assert!(notes.select(&first));
        assert!(!notes.is_delete_pending());
        assert!(!notes.select(&EntityId::from_string("missing")));
        assert_eq!(notes.selected_id(), Some(&first));
    }

    #[test]
    fn previews_follow_note_kind() {
        let mut notes = NotesState::default();
        notes.create(at(0));
        assert_eq!(note_preview(notes.active().expect("active")), "No additional text");

        notes.save_active("t", &"x".repeat(80), at(1));
        assert_eq!(note_preview(notes.active().expect("active")).len(), 50);

        notes.toggle_active_kind();
        let items = notes.active().expect("active").checklist.len();
        assert_eq!(
            note_preview(notes.active().expect("active")),
            format!("0/{items} completed")
        );
    }

    #[test]
    fn short_dates_pick_granularity_by_age() {
        let now = Local.timestamp_opt(1_704_067_200, 0).single().expect("now");
        let updated = now.with_timezone(&Utc);

        let today = format_short_date(updated - Duration::hours(2), now);
        assert!(today.ends_with("AM") || today.ends_with("PM"));

        let this_week = format_short_date(updated - Duration::days(3), now);
        assert_eq!(this_week.len(), 3);

        let older = format_short_date(updated - Duration::days(30), now);
        assert!(older.contains(' '));
        assert!(!older.ends_with('M'));
    }

    #[test]
    fn legacy_note_json_decodes() {
        let raw = r#"{
            "id": 1704067200000,
            "type": "checklist",
            "title": "Groceries",
            "content": "",
            "checklist": [{"id": 1704067200001.5, "text": "eggs", "completed": true}],
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-01T00:00:01.000Z"
        }"#;
        let note: Note = serde_json::from_str(raw).expect("decode");
        assert_eq!(note.id.as_str(), "1704067200000");
        assert_eq!(note.kind, NoteKind::Checklist);
        assert_eq!(note.checklist[0].id.as_str(), "1704067200001.5");
        assert_eq!(note.updated_at, at(1));
    }
}
