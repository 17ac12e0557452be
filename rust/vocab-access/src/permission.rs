//! The CRUDV permission alphabet.

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TermError;

/// A single permission letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    Create,
    Read,
    Update,
    Delete,
    Validate,
}

impl Permission {
    /// Every permission, in canonical `CRUDV` order.
    pub const ALL: [Permission; 5] = [
        Permission::Create,
        Permission::Read,
        Permission::Update,
        Permission::Delete,
        Permission::Validate,
    ];

    pub fn letter(self) -> char {
        match self {
            Permission::Create => 'C',
            Permission::Read => 'R',
            Permission::Update => 'U',
            Permission::Delete => 'D',
            Permission::Validate => 'V',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Permission::ALL.into_iter().find(|p| p.letter() == letter)
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A set of permission letters.
///
/// Renders in canonical `CRUDV` order regardless of the order the letters
/// were written in, so `"UC"` and `"CU"` are the same set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permissions(u8);

impl Permissions {
    pub const C: Permissions = Permissions(Permission::Create.bit());
    pub const R: Permissions = Permissions(Permission::Read.bit());
    pub const U: Permissions = Permissions(Permission::Update.bit());
    pub const D: Permissions = Permissions(Permission::Delete.bit());
    pub const V: Permissions = Permissions(Permission::Validate.bit());
    pub const CRUD: Permissions = Permissions(
        Permission::Create.bit()
            | Permission::Read.bit()
            | Permission::Update.bit()
            | Permission::Delete.bit(),
    );
    pub const CRUDV: Permissions = Permissions(Permissions::CRUD.0 | Permission::Validate.bit());

    pub const fn empty() -> Self {
        Permissions(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.0 & permission.bit() != 0
    }

    pub fn insert(&mut self, permission: Permission) {
        self.0 |= permission.bit();
    }

    /// Returns `true` if every letter of `self` is also in `other`.
    pub fn is_subset_of(&self, other: &Permissions) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        Permission::ALL.into_iter().filter(|p| self.contains(*p))
    }
}

impl BitOr for Permissions {
    type Output = Permissions;

    fn bitor(self, rhs: Self) -> Self::Output {
        Permissions(self.0 | rhs.0)
    }
}

impl FromIterator<Permission> for Permissions {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        let mut permissions = Permissions::empty();
        for permission in iter {
            permissions.insert(permission);
        }
        permissions
    }
}

impl FromStr for Permissions {
    type Err = TermError;

    /// Parses a non-empty string of `CRUDV` letters. Letters are
    /// case-sensitive; repeated letters are accepted.
    fn from_str(letters: &str) -> Result<Self, Self::Err> {
        let mut permissions = Permissions::empty();
        for letter in letters.chars() {
            let permission =
                Permission::from_letter(letter).ok_or_else(|| TermError::InvalidPermission {
                    letter,
                    letters: letters.to_string(),
                })?;
            permissions.insert(permission);
        }
        if permissions.is_empty() {
            return Err(TermError::EmptyPermissions);
        }
        Ok(permissions)
    }
}

impl TryFrom<String> for Permissions {
    type Error = TermError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Permissions> for String {
    fn from(value: Permissions) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for permission in self.iter() {
            write!(f, "{}", permission.letter())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permissions({self})")
    }
}
