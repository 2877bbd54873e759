//! Key binding table and sequence resolution
//!
//! A key that completes a binding nobody extends fires at once. A key that
//! is a prefix of a longer binding is held until either the sequence is
//! completed, it stops matching, or the timeout passes. The timeout is not a
//! timer: the event loop calls [`KeyResolver::expire`] and the resolver
//! compares against the stored deadline.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::keys::Key;

pub const DEFAULT_SEQUENCE_TIMEOUT: Duration = Duration::from_millis(1000);

#[derive(Debug, Default)]
pub struct BindingTable {
    bindings: HashMap<Vec<Key>, String>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, keys: Vec<Key>, command: String) {
        tracing::trace!(keys = %super::keys::format_sequence(&keys), %command, "Key bound");
        self.bindings.insert(keys, command);
    }

    pub fn unbind(&mut self, keys: &[Key]) -> Option<String> {
        self.bindings.remove(keys)
    }

    pub fn get(&self, keys: &[Key]) -> Option<&str> {
        self.bindings.get(keys).map(String::as_str)
    }

    /// True if some binding is strictly longer than `prefix` and starts with it.
    pub fn has_longer(&self, prefix: &[Key]) -> bool {
        self.bindings
            .keys()
            .any(|k| k.len() > prefix.len() && k.starts_with(prefix))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum ResolverState {
    Idle,
    Pending { keys: Vec<Key>, deadline: Instant },
}

/// What a key press amounted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Run this command line
    Dispatch(String),
    /// Waiting for more keys
    Pending,
    /// The sequence matched nothing and was dropped
    Unbound,
}

pub struct KeyResolver {
    bindings: Rc<RefCell<BindingTable>>,
    timeout: Duration,
    state: ResolverState,
}

impl KeyResolver {
    pub fn new(bindings: Rc<RefCell<BindingTable>>, timeout: Duration) -> Self {
        Self {
            bindings,
            timeout,
            state: ResolverState::Idle,
        }
    }

    /// Feed one key. A pending sequence whose deadline passed before `now`
    /// is resolved first, so its command comes out ahead of whatever the new
    /// key starts.
    pub fn press(&mut self, key: Key, now: Instant) -> Vec<Resolution> {
        let mut resolutions = Vec::with_capacity(2);
        if let Some(command) = self.expire(now) {
            resolutions.push(Resolution::Dispatch(command));
        }
        resolutions.push(self.extend(key, now));
        resolutions
    }

    fn extend(&mut self, key: Key, now: Instant) -> Resolution {
        let mut keys = match std::mem::replace(&mut self.state, ResolverState::Idle) {
            ResolverState::Idle => Vec::new(),
            ResolverState::Pending { keys, .. } => keys,
        };
        keys.push(key);

        let table = self.bindings.borrow();
        if table.has_longer(&keys) {
            self.state = ResolverState::Pending {
                keys,
                deadline: now + self.timeout,
            };
            return Resolution::Pending;
        }
        match table.get(&keys) {
            Some(command) => Resolution::Dispatch(command.to_string()),
            None => {
                tracing::trace!(keys = %super::keys::format_sequence(&keys), "Unbound key sequence");
                Resolution::Unbound
            }
        }
    }

    /// Resolve a pending sequence whose deadline has passed. The longest
    /// prefix of the typed keys that is bound wins.
    pub fn expire(&mut self, now: Instant) -> Option<String> {
        let ResolverState::Pending { keys, deadline } = &self.state else {
            return None;
        };
        if now < *deadline {
            return None;
        }
        let table = self.bindings.borrow();
        let command = (1..=keys.len())
            .rev()
            .find_map(|n| table.get(&keys[..n]))
            .map(str::to_string);
        drop(table);
        self.state = ResolverState::Idle;
        command
    }

    /// Forget a pending sequence.
    pub fn cancel(&mut self) {
        self.state = ResolverState::Idle;
    }

    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            ResolverState::Idle => None,
            ResolverState::Pending { deadline, .. } => Some(*deadline),
        }
    }

    pub fn pending(&self) -> &[Key] {
        match &self.state {
            ResolverState::Idle => &[],
            ResolverState::Pending { keys, .. } => keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keys::parse_sequence;

    fn resolver(bindings: &[(&str, &str)]) -> KeyResolver {
        let mut table = BindingTable::new();
        for (keys, command) in bindings {
            table.bind(parse_sequence(keys).unwrap(), command.to_string());
        }
        KeyResolver::new(Rc::new(RefCell::new(table)), Duration::from_millis(500))
    }

    fn key(c: char) -> Key {
        Key::char(c)
    }

    #[test]
    fn unambiguous_key_fires_immediately() {
        let mut r = resolver(&[("j", "cursor down"), ("gg", "cursor home")]);
        let now = Instant::now();
        assert_eq!(r.press(key('j'), now), vec![Resolution::Dispatch("cursor down".into())]);
        assert_eq!(r.deadline(), None);
    }

    #[test]
    fn prefix_waits_then_times_out_to_shorter_binding() {
        let mut r = resolver(&[("g", "X"), ("gg", "Y")]);
        let now = Instant::now();
        assert_eq!(r.press(key('g'), now), vec![Resolution::Pending]);
        assert_eq!(r.pending(), &[key('g')]);
        assert_eq!(r.expire(now + Duration::from_millis(100)), None);
        assert_eq!(r.expire(now + Duration::from_millis(600)), Some("X".into()));
        assert_eq!(r.deadline(), None);
    }

    #[test]
    fn completed_sequence_fires_within_deadline() {
        let mut r = resolver(&[("g", "X"), ("gg", "Y")]);
        let now = Instant::now();
        assert_eq!(r.press(key('g'), now), vec![Resolution::Pending]);
        assert_eq!(
            r.press(key('g'), now + Duration::from_millis(200)),
            vec![Resolution::Dispatch("Y".into())]
        );
        assert_eq!(r.expire(now + Duration::from_secs(5)), None);
    }

    #[test]
    fn late_key_flushes_the_expired_sequence_first() {
        let mut r = resolver(&[("g", "X"), ("gg", "Y")]);
        let now = Instant::now();
        assert_eq!(r.press(key('g'), now), vec![Resolution::Pending]);
        assert_eq!(
            r.press(key('g'), now + Duration::from_secs(2)),
            vec![Resolution::Dispatch("X".into()), Resolution::Pending]
        );
        assert_eq!(r.pending(), &[key('g')]);
        assert_eq!(
            r.press(key('g'), now + Duration::from_millis(2100)),
            vec![Resolution::Dispatch("Y".into())]
        );
    }

    #[test]
    fn late_key_after_unbound_prefix_starts_fresh() {
        let mut r = resolver(&[("ab", "X"), ("j", "Z")]);
        let now = Instant::now();
        r.press(key('a'), now);
        assert_eq!(
            r.press(key('j'), now + Duration::from_secs(2)),
            vec![Resolution::Dispatch("Z".into())]
        );
    }

    #[test]
    fn unrelated_key_drops_the_sequence() {
        let mut r = resolver(&[("g", "X"), ("gg", "Y"), ("j", "Z")]);
        let now = Instant::now();
        r.press(key('g'), now);
        assert_eq!(r.press(key('j'), now), vec![Resolution::Unbound]);
        assert_eq!(r.deadline(), None);
        assert_eq!(r.expire(now + Duration::from_secs(5)), None);
    }

    #[test]
    fn each_key_refreshes_the_deadline() {
        let mut r = resolver(&[("abc", "X")]);
        let start = Instant::now();
        r.press(key('a'), start);
        r.press(key('b'), start + Duration::from_millis(400));
        assert_eq!(r.deadline(), Some(start + Duration::from_millis(900)));
        assert_eq!(r.expire(start + Duration::from_millis(600)), None);
        // Nothing bound for "ab" or "a": discarded silently.
        assert_eq!(r.expire(start + Duration::from_millis(1000)), None);
        assert!(r.pending().is_empty());
    }

    #[test]
    fn timeout_falls_back_to_longest_bound_prefix() {
        let mut r = resolver(&[("g", "X"), ("gab", "Y")]);
        let now = Instant::now();
        r.press(key('g'), now);
        assert_eq!(r.press(key('a'), now), vec![Resolution::Pending]);
        assert_eq!(r.expire(now + Duration::from_secs(1)), Some("X".into()));
    }

    #[test]
    fn cancel_clears_pending_state() {
        let mut r = resolver(&[("g", "X"), ("gg", "Y")]);
        let now = Instant::now();
        r.press(key('g'), now);
        r.cancel();
        assert_eq!(r.expire(now + Duration::from_secs(1)), None);
        assert_eq!(r.press(key('x'), now), vec![Resolution::Unbound]);
    }

    #[test]
    fn table_rebinds_and_unbinds() {
        let mut table = BindingTable::new();
        let keys = parse_sequence("gc").unwrap();
        table.bind(keys.clone(), "cursor current".into());
        table.bind(keys.clone(), "cursor home".into());
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&keys), Some("cursor home"));
        assert!(table.has_longer(&keys[..1]));
        assert!(!table.has_longer(&keys));
        assert_eq!(table.unbind(&keys), Some("cursor home".into()));
        assert!(table.is_empty());
    }
}
