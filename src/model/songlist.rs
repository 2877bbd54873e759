//! Songlists and the collection shown in the main area

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use super::song::{Song, SongId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// MPD's play queue
    Queue,
    /// Every song in the MPD database
    Library,
    /// Result of a search
    Search,
    /// Lists derived by the user
    Custom,
}

#[derive(Clone, Debug)]
pub struct Songlist {
    pub name: String,
    pub kind: ListKind,
    songs: Vec<Song>,
    cursor: usize,
    offset: usize,
    selected: BTreeSet<usize>,
    /// Where visual selection started, while it is on
    visual_anchor: Option<usize>,
}

impl Songlist {
    pub fn new(name: impl Into<String>, kind: ListKind, songs: Vec<Song>) -> Self {
        Self {
            name: name.into(),
            kind,
            songs,
            cursor: 0,
            offset: 0,
            selected: BTreeSet::new(),
            visual_anchor: None,
        }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn cursor_song(&self) -> Option<&Song> {
        self.songs.get(self.cursor)
    }

    /// Move the cursor, clamped to the list bounds.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index.min(self.songs.len().saturating_sub(1));
    }

    pub fn move_cursor(&mut self, delta: i64) {
        let target = (self.cursor as i64).saturating_add(delta).max(0);
        self.set_cursor(target as usize);
    }

    /// Swap in new contents, keeping the cursor where it was if possible.
    /// Selections refer to rows and are dropped.
    pub fn replace(&mut self, songs: Vec<Song>) {
        self.songs = songs;
        self.clear_selection();
        self.set_cursor(self.cursor);
    }

    fn visual_range(&self) -> Option<RangeInclusive<usize>> {
        let anchor = self.visual_anchor?;
        Some(anchor.min(self.cursor)..=anchor.max(self.cursor))
    }

    pub fn in_visual_mode(&self) -> bool {
        self.visual_anchor.is_some()
    }

    /// Start selecting from the cursor, or stop and forget the range.
    pub fn toggle_visual(&mut self) {
        self.visual_anchor = match self.visual_anchor {
            Some(_) => None,
            None => Some(self.cursor),
        };
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index) || self.visual_range().is_some_and(|r| r.contains(&index))
    }

    pub fn toggle_selected(&mut self, index: usize) {
        if index >= self.songs.len() {
            return;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }

    /// Select the run of songs around the cursor that share every one of
    /// `tags` with the cursor song.
    pub fn select_nearby(&mut self, tags: &[String]) {
        let Some(current) = self.cursor_song() else {
            return;
        };
        let same = |song: &Song| tags.iter().all(|t| song.sort_tag(t) == current.sort_tag(t));
        let mut start = self.cursor;
        while start > 0 && same(&self.songs[start - 1]) {
            start -= 1;
        }
        let mut end = self.cursor;
        while end + 1 < self.songs.len() && same(&self.songs[end + 1]) {
            end += 1;
        }
        self.selected.extend(start..=end);
    }

    /// Selected row indices in list order, including a visual range.
    pub fn selection(&self) -> Vec<usize> {
        let mut rows: BTreeSet<usize> = self.selected.clone();
        if let Some(range) = self.visual_range() {
            rows.extend(range);
        }
        rows.into_iter().filter(|&i| i < self.songs.len()).collect()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.visual_anchor = None;
    }

    /// The selected songs, or the song under the cursor when nothing is
    /// selected.
    pub fn selected_songs(&self) -> Vec<Song> {
        let rows = self.selection();
        if rows.is_empty() {
            return self.cursor_song().cloned().into_iter().collect();
        }
        rows.into_iter().map(|i| self.songs[i].clone()).collect()
    }

    /// Rows the selection-aware commands act on.
    pub fn target_rows(&self) -> Vec<usize> {
        let rows = self.selection();
        if rows.is_empty() && !self.songs.is_empty() {
            return vec![self.cursor];
        }
        rows
    }

    /// Take the given rows out of the list. The cursor lands on the row that
    /// followed the first removed one.
    pub fn remove_rows(&mut self, rows: &[usize]) -> Vec<Song> {
        let rows: BTreeSet<usize> = rows.iter().copied().filter(|&i| i < self.songs.len()).collect();
        let Some(&first) = rows.first() else {
            return Vec::new();
        };
        let mut removed = Vec::with_capacity(rows.len());
        let mut kept = Vec::with_capacity(self.songs.len() - rows.len());
        for (i, song) in std::mem::take(&mut self.songs).into_iter().enumerate() {
            if rows.contains(&i) {
                removed.push(song);
            } else {
                kept.push(song);
            }
        }
        self.songs = kept;
        self.clear_selection();
        self.set_cursor(first);
        removed
    }

    /// Insert songs before row `at` (or at the end), leaving the cursor on
    /// the first inserted song.
    pub fn insert(&mut self, at: usize, songs: Vec<Song>) {
        let at = at.min(self.songs.len());
        let count = songs.len();
        self.songs.splice(at..at, songs);
        self.clear_selection();
        if count > 0 {
            self.set_cursor(at);
        }
    }

    /// Index of the first song after the cursor whose `tag` differs from the
    /// cursor song's, or the last index.
    pub fn next_of(&self, tag: &str) -> usize {
        let Some(current) = self.cursor_song() else {
            return 0;
        };
        let value = current.sort_tag(tag);
        self.songs
            .iter()
            .enumerate()
            .skip(self.cursor + 1)
            .find(|(_, s)| s.sort_tag(tag) != value)
            .map(|(i, _)| i)
            .unwrap_or(self.songs.len().saturating_sub(1))
    }

    /// Start of the cursor song's `tag` group, or of the previous group if
    /// the cursor already sits at a group start.
    pub fn prev_of(&self, tag: &str) -> usize {
        if self.cursor == 0 || self.songs.is_empty() {
            return 0;
        }
        let group_start = |end: usize| {
            let value = self.songs[end].sort_tag(tag);
            let mut i = end;
            while i > 0 && self.songs[i - 1].sort_tag(tag) == value {
                i -= 1;
            }
            i
        };
        let start = group_start(self.cursor);
        if start < self.cursor {
            start
        } else {
            group_start(self.cursor - 1)
        }
    }

    /// Stable sort by each key, least significant key first.
    pub fn sort_by_tags(&mut self, tags: &[String]) {
        for tag in tags.iter().rev() {
            self.songs.sort_by(|a, b| a.sort_tag(tag).cmp(b.sort_tag(tag)));
        }
        self.clear_selection();
        self.cursor = 0;
        self.offset = 0;
    }

    pub fn position_of(&self, id: SongId) -> Option<usize> {
        self.songs.iter().position(|s| s.id == Some(id))
    }

    pub fn position_of_file(&self, file: &str) -> Option<usize> {
        self.songs.iter().position(|s| s.file() == Some(file))
    }

    /// Scroll so that the cursor is visible in a viewport of `height` rows.
    pub fn scroll_to_cursor(&mut self, height: usize, center: bool) {
        if height == 0 {
            return;
        }
        let max_offset = self.songs.len().saturating_sub(height);
        if center {
            self.offset = self.cursor.saturating_sub(height / 2).min(max_offset);
        } else if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
        self.offset = self.offset.min(max_offset);
    }

    pub fn filter(&self, name: impl Into<String>, term: &str) -> Songlist {
        let needle = term.to_lowercase();
        let songs = self
            .songs
            .iter()
            .filter(|s| s.matches(&needle))
            .cloned()
            .collect();
        Songlist::new(name, ListKind::Search, songs)
    }

    /// Songs of this list whose `tags` all equal those of `song`, as a list
    /// of its own named after the matched values.
    pub fn isolate(&self, song: &Song, tags: &[String]) -> Songlist {
        let songs = self
            .songs
            .iter()
            .filter(|s| tags.iter().all(|t| s.sort_tag(t) == song.sort_tag(t)))
            .cloned()
            .collect();
        let name = tags
            .iter()
            .map(|t| song.tag(t).unwrap_or("<unknown>"))
            .collect::<Vec<_>>()
            .join(" - ");
        Songlist::new(name, ListKind::Custom, songs)
    }
}

/// The lists the user can switch between, plus what the view needs to know
/// about them.
#[derive(Debug)]
pub struct SonglistView {
    lists: Vec<Songlist>,
    active: usize,
    search: Option<Songlist>,
    current_song: Option<Song>,
    page_size: usize,
    clipboard: Vec<Song>,
}

impl Default for SonglistView {
    fn default() -> Self {
        Self {
            lists: vec![
                Songlist::new("Queue", ListKind::Queue, Vec::new()),
                Songlist::new("Library", ListKind::Library, Vec::new()),
            ],
            active: 0,
            search: None,
            current_song: None,
            page_size: 1,
            clipboard: Vec::new(),
        }
    }
}

impl SonglistView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The list currently on screen. A live search result takes precedence.
    pub fn active(&self) -> &Songlist {
        self.search.as_ref().unwrap_or(&self.lists[self.active])
    }

    pub fn active_mut(&mut self) -> &mut Songlist {
        match self.search.as_mut() {
            Some(search) => search,
            None => &mut self.lists[self.active],
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn cursor_song(&self) -> Option<&Song> {
        self.active().cursor_song()
    }

    /// Whether the displayed list is the playback service's live queue.
    pub fn is_queue(&self) -> bool {
        self.active().kind == ListKind::Queue
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.lists.len() {
            return false;
        }
        self.search = None;
        self.active = index;
        true
    }

    pub fn cycle(&mut self, forward: bool) {
        let len = self.lists.len();
        let next = if forward {
            (self.active + 1) % len
        } else {
            (self.active + len - 1) % len
        };
        self.select(next);
    }

    /// Replace the contents of the first list of the given kind.
    pub fn replace(&mut self, kind: ListKind, songs: Vec<Song>) {
        if let Some(list) = self.lists.iter_mut().find(|l| l.kind == kind) {
            list.replace(songs);
        }
    }

    pub fn list(&self, kind: ListKind) -> Option<&Songlist> {
        self.lists.iter().find(|l| l.kind == kind)
    }

    /// Add a list and show it.
    pub fn push(&mut self, list: Songlist) {
        tracing::debug!(name = %list.name, songs = list.len(), "Songlist added");
        self.search = None;
        self.lists.push(list);
        self.active = self.lists.len() - 1;
    }

    /// Copy the displayed list into a new user list.
    pub fn duplicate_active(&mut self) {
        let source = self.active();
        let mut copy = Songlist::new(
            format!("{} (copy)", source.name),
            ListKind::Custom,
            source.songs.clone(),
        );
        copy.set_cursor(source.cursor);
        self.push(copy);
    }

    /// Close the displayed list. The queue and the library stay; returns
    /// false for them.
    pub fn remove_active(&mut self) -> bool {
        if self.search.take().is_some() {
            return true;
        }
        if matches!(self.lists[self.active].kind, ListKind::Queue | ListKind::Library) {
            return false;
        }
        let removed = self.lists.remove(self.active);
        tracing::debug!(name = %removed.name, "Songlist removed");
        self.active = self.active.saturating_sub(1).min(self.lists.len() - 1);
        true
    }

    pub fn clipboard(&self) -> &[Song] {
        &self.clipboard
    }

    pub fn set_clipboard(&mut self, songs: Vec<Song>) {
        self.clipboard = songs;
    }

    /// Show the library filtered by `term` until the search is committed or
    /// cancelled. An empty term shows nothing special.
    pub fn show_search(&mut self, term: &str) {
        if term.is_empty() {
            self.search = None;
            return;
        }
        let source = self.list(ListKind::Library).unwrap_or(&self.lists[self.active]);
        self.search = Some(source.filter(format!("Search: {term}"), term));
    }

    /// Keep the live search result as a list of its own.
    pub fn commit_search(&mut self) {
        if let Some(result) = self.search.take() {
            if result.is_empty() {
                return;
            }
            self.lists.push(result);
            self.active = self.lists.len() - 1;
        }
    }

    pub fn cancel_search(&mut self) {
        self.search = None;
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.current_song.as_ref()
    }

    pub fn set_current_song(&mut self, song: Option<Song>) {
        self.current_song = song;
    }

    /// Index of the playing song in the displayed list, if it is there.
    pub fn current_song_index(&self) -> Option<usize> {
        let current = self.current_song.as_ref()?;
        let list = self.active();
        if list.kind == ListKind::Queue {
            if let Some(id) = current.id {
                return list.position_of(id);
            }
        }
        list.position_of_file(current.file()?)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Record the viewport height and keep the cursor on screen.
    pub fn update_viewport(&mut self, height: usize, center: bool) {
        self.page_size = height.max(1);
        self.active_mut().scroll_to_cursor(height, center);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn album_song(album: &str, title: &str) -> Song {
        Song::from_tags([
            ("file", format!("{album}/{title}.flac")),
            ("album", album.to_string()),
            ("title", title.to_string()),
        ])
    }

    fn albums() -> Songlist {
        let songs = vec![
            album_song("A", "1"),
            album_song("A", "2"),
            album_song("A", "3"),
            album_song("B", "1"),
            album_song("B", "2"),
            album_song("C", "1"),
        ];
        Songlist::new("test", ListKind::Custom, songs)
    }

    #[test]
    fn cursor_is_clamped() {
        let mut list = albums();
        list.move_cursor(-3);
        assert_eq!(list.cursor(), 0);
        list.move_cursor(100);
        assert_eq!(list.cursor(), 5);
        list.replace(vec![album_song("A", "1")]);
        assert_eq!(list.cursor(), 0);
    }

    #[test]
    fn next_of_jumps_to_next_group() {
        let mut list = albums();
        assert_eq!(list.next_of("album"), 3);
        list.set_cursor(3);
        assert_eq!(list.next_of("album"), 5);
        list.set_cursor(5);
        assert_eq!(list.next_of("album"), 5);
    }

    #[test]
    fn prev_of_goes_to_group_start_then_previous_group() {
        let mut list = albums();
        list.set_cursor(4);
        assert_eq!(list.prev_of("album"), 3);
        list.set_cursor(3);
        assert_eq!(list.prev_of("album"), 0);
        list.set_cursor(0);
        assert_eq!(list.prev_of("album"), 0);
    }

    #[test]
    fn sort_is_stable_across_keys() {
        let mut list = Songlist::new(
            "test",
            ListKind::Custom,
            vec![
                album_song("B", "1"),
                album_song("A", "2"),
                album_song("B", "0"),
                album_song("A", "1"),
            ],
        );
        list.sort_by_tags(&["album".to_string(), "title".to_string()]);
        let order: Vec<_> = list.songs().iter().filter_map(|s| s.file()).collect();
        assert_eq!(order, vec!["A/1.flac", "A/2.flac", "B/0.flac", "B/1.flac"]);
    }

    #[test]
    fn scrolling_keeps_cursor_visible() {
        let mut list = albums();
        list.set_cursor(5);
        list.scroll_to_cursor(2, false);
        assert_eq!(list.offset(), 4);
        list.set_cursor(1);
        list.scroll_to_cursor(2, false);
        assert_eq!(list.offset(), 1);
        list.set_cursor(3);
        list.scroll_to_cursor(3, true);
        assert_eq!(list.offset(), 2);
    }

    #[test]
    fn search_results_shadow_the_active_list() {
        let mut view = SonglistView::new();
        view.replace(ListKind::Library, albums().songs().to_vec());
        assert!(view.is_queue());

        view.show_search("b/");
        assert_eq!(view.active().kind, ListKind::Search);
        assert_eq!(view.active().len(), 2);
        assert!(!view.is_queue());

        view.commit_search();
        assert_eq!(view.len(), 3);
        assert_eq!(view.active_index(), 2);

        view.show_search("zzz");
        view.cancel_search();
        assert_eq!(view.active_index(), 2);
        assert_eq!(view.active().len(), 2);
    }

    #[test]
    fn visual_range_follows_the_cursor() {
        let mut list = albums();
        list.set_cursor(1);
        list.toggle_visual();
        list.set_cursor(3);
        assert_eq!(list.selection(), vec![1, 2, 3]);
        list.set_cursor(0);
        assert_eq!(list.selection(), vec![0, 1]);
        list.toggle_selected(4);
        assert_eq!(list.selection(), vec![0, 1, 4]);
        list.toggle_visual();
        assert_eq!(list.selection(), vec![4]);
        assert!(!list.in_visual_mode());
    }

    #[test]
    fn nearby_selects_the_tag_group() {
        let mut list = albums();
        list.set_cursor(1);
        list.select_nearby(&["album".to_string()]);
        assert_eq!(list.selection(), vec![0, 1, 2]);
        let titles: Vec<_> = list
            .selected_songs()
            .iter()
            .filter_map(|s| s.tag("title").map(str::to_string))
            .collect();
        assert_eq!(titles, vec!["1", "2", "3"]);
    }

    #[test]
    fn cursor_song_stands_in_for_an_empty_selection() {
        let mut list = albums();
        list.set_cursor(4);
        assert_eq!(list.target_rows(), vec![4]);
        assert_eq!(list.selected_songs()[0].file(), Some("B/2.flac"));
        assert!(Songlist::new("empty", ListKind::Custom, Vec::new())
            .target_rows()
            .is_empty());
    }

    #[test]
    fn remove_and_insert_rows() {
        let mut list = albums();
        let removed = list.remove_rows(&[1, 3]);
        let files: Vec<_> = removed.iter().filter_map(|s| s.file()).collect();
        assert_eq!(files, vec!["A/2.flac", "B/1.flac"]);
        assert_eq!(list.len(), 4);
        assert_eq!(list.cursor(), 1);

        list.insert(1, removed);
        let order: Vec<_> = list.songs().iter().filter_map(|s| s.file()).collect();
        assert_eq!(
            order,
            vec!["A/1.flac", "A/2.flac", "B/1.flac", "A/3.flac", "B/2.flac", "C/1.flac"]
        );
        assert_eq!(list.cursor(), 1);
    }

    #[test]
    fn isolate_keeps_matching_songs() {
        let list = albums();
        let song = album_song("B", "9");
        let isolated = list.isolate(&song, &["album".to_string()]);
        assert_eq!(isolated.name, "B");
        assert_eq!(isolated.kind, ListKind::Custom);
        assert_eq!(isolated.len(), 2);
    }

    #[test]
    fn duplicate_and_remove_lists() {
        let mut view = SonglistView::new();
        view.replace(ListKind::Queue, albums().songs().to_vec());
        assert!(!view.remove_active());

        view.duplicate_active();
        assert_eq!(view.len(), 3);
        assert_eq!(view.active().name, "Queue (copy)");
        assert_eq!(view.active().kind, ListKind::Custom);
        assert_eq!(view.active().len(), 6);

        assert!(view.remove_active());
        assert_eq!(view.len(), 2);
        assert_eq!(view.active_index(), 1);
        assert!(!view.remove_active());
    }

    #[test]
    fn current_song_is_found_by_id_in_the_queue() {
        let mut view = SonglistView::new();
        let queued = |id: &str, file: &str| Song::from_tags([("file", file), ("id", id)]);
        view.replace(ListKind::Queue, vec![queued("7", "a"), queued("9", "b")]);
        view.set_current_song(Some(queued("9", "b")));
        assert_eq!(view.current_song_index(), Some(1));
    }
}
