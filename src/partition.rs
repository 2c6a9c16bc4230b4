use std::collections::HashMap;

use crate::error::{BuildError, Category};

/// Records which are addressed by a unique name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Arena of records of one category, addressable by name.
///
/// Iteration follows insertion order, which is document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
    category: Category,
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Named> Partition<T> {
    pub(crate) fn new(category: Category) -> Self {
        Partition {
            category,
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Appends `item`, failing if its name is already taken.
    pub(crate) fn insert(&mut self, item: T) -> Result<usize, BuildError> {
        let position = self.items.len();
        let name = item.name();
        if self.index.contains_key(name) {
            return Err(BuildError::DuplicateKey {
                category: self.category,
                name: String::from(name),
            });
        }
        self.index.insert(String::from(name), position);
        self.items.push(item);
        Ok(position)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&i| &self.items[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(Named::name)
    }
}

impl<T> Partition<T> {
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Partition<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(feature = "serialize")]
impl<T: serde::Serialize> serde::Serialize for Partition<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(&'static str, u32);

    impl Named for Item {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn lookup_by_name_and_order() {
        let mut partition = Partition::new(Category::Handle);
        assert_eq!(partition.insert(Item("b", 1)), Ok(0));
        assert_eq!(partition.insert(Item("a", 2)), Ok(1));

        assert_eq!(partition.get("a"), Some(&Item("a", 2)));
        assert!(partition.get("c").is_none());
        assert_eq!(partition.names().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(partition.len(), 2);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut partition = Partition::new(Category::Struct);
        partition.insert(Item("VkExtent2D", 0)).unwrap();
        assert_eq!(
            partition.insert(Item("VkExtent2D", 1)),
            Err(BuildError::DuplicateKey {
                category: Category::Struct,
                name: String::from("VkExtent2D"),
            })
        );
        assert_eq!(partition.get("VkExtent2D"), Some(&Item("VkExtent2D", 0)));
    }
}
