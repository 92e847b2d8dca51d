use std::path::Path;
use sled::Tree;
use recipes_common::non_api_structs::StoredUser;
use recipes_common::{User, USER_DATA_KEY};
use crate::Result;

/// String key/value storage that outlives the process, like a browser's
/// `localStorage`.
#[derive(Clone)]
pub struct LocalStorage {
    tree: Tree,
}

impl LocalStorage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self { tree: sled::open(path)?.open_tree("local_storage")? })
    }
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { tree: db.open_tree("local_storage")? })
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(match self.tree.get(key)? {
            Some(bytes) => Some(String::from_utf8(bytes.to_vec())?),
            None => None,
        })
    }
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.tree.insert(key, value.as_bytes())?;
        self.tree.flush()?;
        Ok(())
    }
    pub fn remove_item(&self, key: &str) -> Result<()> {
        self.tree.remove(key)?;
        self.tree.flush()?;
        Ok(())
    }

    pub fn load_user(&self) -> Result<Option<StoredUser>> {
        match self.get_item(USER_DATA_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
    pub fn save_user(&self, user: &User) -> Result<()> {
        self.set_item(USER_DATA_KEY, &serde_json::to_string(&StoredUser::from(user))?)
    }
    pub fn clear_user(&self) -> Result<()> {
        self.remove_item(USER_DATA_KEY)
    }
}
