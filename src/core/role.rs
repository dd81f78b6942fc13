//! Role identification and per-role data storage.
//!
//! ## Role
//!
//! Type-safe role index. Games number their roles from 0; the first role
//! listed by a game is `Role(0)`.
//!
//! ## RoleMap
//!
//! Per-role data with O(1) access, indexed by `Role`. Backed by a
//! `SmallVec` so the common two-role case never touches the heap.

use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

/// Role index within a game (0-based).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Role(pub u8);

impl Role {
    /// Create a new role.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the raw role index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all roles of a game with `role_count` roles.
    ///
    /// ```
    /// use game_arena::core::Role;
    ///
    /// let roles: Vec<_> = Role::all(2).collect();
    /// assert_eq!(roles, vec![Role::new(0), Role::new(1)]);
    /// ```
    pub fn all(role_count: usize) -> impl Iterator<Item = Role> {
        (0..role_count as u8).map(Role)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "role {}", self.0)
    }
}

/// Per-role data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use game_arena::core::{Role, RoleMap};
///
/// let mut totals: RoleMap<f64> = RoleMap::with_value(2, 0.0);
/// totals[Role::new(1)] += 1.0;
/// assert_eq!(totals[Role::new(1)], 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RoleMap<T> {
    data: SmallVec<[T; 2]>,
}

impl<T> RoleMap<T> {
    /// Create a new RoleMap with values from a factory function.
    pub fn new(role_count: usize, factory: impl Fn(Role) -> T) -> Self {
        assert!(role_count > 0, "Must have at least 1 role");
        assert!(role_count <= 255, "At most 255 roles supported");

        let data = Role::all(role_count).map(factory).collect();
        Self { data }
    }

    /// Create a new RoleMap with all entries set to the same value.
    pub fn with_value(role_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(role_count, |_| value.clone())
    }

    /// Build a map from per-role values listed in role order.
    pub fn from_vec(values: Vec<T>) -> Self {
        assert!(!values.is_empty(), "Must have at least 1 role");
        Self {
            data: SmallVec::from_vec(values),
        }
    }

    /// Number of roles.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a role's data.
    #[must_use]
    pub fn get(&self, role: Role) -> &T {
        &self.data[role.index()]
    }

    /// Get a mutable reference to a role's data.
    pub fn get_mut(&mut self, role: Role) -> &mut T {
        &mut self.data[role.index()]
    }

    /// Iterate over (Role, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (Role(i as u8), v))
    }

    /// Values in role order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl RoleMap<f64> {
    /// Add every entry of `values` to the matching entry of this map.
    pub fn accumulate(&mut self, values: &RoleMap<f64>) {
        for (total, value) in self.data.iter_mut().zip(values.data.iter()) {
            *total += *value;
        }
    }
}

impl<T> Index<Role> for RoleMap<T> {
    type Output = T;

    fn index(&self, role: Role) -> &Self::Output {
        self.get(role)
    }
}

impl<T> IndexMut<Role> for RoleMap<T> {
    fn index_mut(&mut self, role: Role) -> &mut Self::Output {
        self.get_mut(role)
    }
}
