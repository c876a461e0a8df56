//! Account entity: the SeaORM row type plus the `Account` domain object the
//! handlers work with.
//!
//! An `Account` is transient while `id` is `None` and persisted once the store
//! has assigned one. Payload (de)serialization never reads or writes the id.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{NotSet, Unchanged},
    DatabaseConnection, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: Option<String>,
    pub date_joined: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: Option<String>,
    pub date_joined: NaiveDate,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            email: String::new(),
            address: String::new(),
            phone_number: None,
            date_joined: Utc::now().date_naive(),
        }
    }
}

impl From<Model> for Account {
    fn from(m: Model) -> Self {
        Self {
            id: Some(m.id),
            name: m.name,
            email: m.email,
            address: m.address,
            phone_number: m.phone_number,
            date_joined: m.date_joined,
        }
    }
}

impl Account {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Populate fields from a JSON object.
    ///
    /// `name`, `email` and `address` must be non-blank strings. `phone_number`
    /// may be a string, `null` or absent. `date_joined` is an ISO date; when
    /// absent the current value is kept. Nothing is assigned unless the whole
    /// payload is valid.
    pub fn deserialize(&mut self, data: &JsonValue) -> Result<&mut Self, ModelError> {
        let obj = data.as_object().ok_or_else(|| {
            ModelError::Data("body of request contained bad or no data".into())
        })?;

        let name = required_str(obj, "name")?;
        let email = required_str(obj, "email")?;
        let address = required_str(obj, "address")?;
        let phone_number = optional_str(obj, "phone_number")?;
        let date_joined = match obj.get("date_joined") {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(s)) => Some(
                NaiveDate::parse_from_str(s, DATE_FORMAT)
                    .map_err(|e| ModelError::Data(format!("bad date_joined '{s}': {e}")))?,
            ),
            Some(_) => return Err(ModelError::Data("date_joined must be a date string".into())),
        };

        self.name = name;
        self.email = email;
        self.address = address;
        self.phone_number = phone_number;
        if let Some(d) = date_joined {
            self.date_joined = d;
        }
        Ok(self)
    }

    pub fn serialize(&self) -> JsonValue {
        json!({
            "id": self.id,
            "name": self.name,
            "email": self.email,
            "address": self.address,
            "phone_number": self.phone_number,
            "date_joined": self.date_joined.format(DATE_FORMAT).to_string(),
        })
    }

    pub fn to_active_model(&self) -> ActiveModel {
        ActiveModel {
            id: match self.id {
                Some(id) => Unchanged(id),
                None => NotSet,
            },
            name: Set(self.name.clone()),
            email: Set(self.email.clone()),
            address: Set(self.address.clone()),
            phone_number: Set(self.phone_number.clone()),
            date_joined: Set(self.date_joined),
        }
    }

    /// Insert a transient account and return the id the store assigned.
    pub async fn create(&mut self, db: &DatabaseConnection) -> Result<i32, ModelError> {
        if let Some(id) = self.id {
            return Err(ModelError::Persisted(id));
        }
        let saved = self.to_active_model().insert(db).await?;
        self.id = Some(saved.id);
        Ok(saved.id)
    }

    /// Write the current field values over the row with this account's id.
    pub async fn update(&self, db: &DatabaseConnection) -> Result<(), ModelError> {
        if self.id.is_none() {
            return Err(ModelError::Transient("update"));
        }
        self.to_active_model().update(db).await?;
        Ok(())
    }

    /// Remove the row; a missing row or a transient account is a no-op.
    pub async fn delete(&self, db: &DatabaseConnection) -> Result<(), ModelError> {
        if let Some(id) = self.id {
            Entity::delete_by_id(id).exec(db).await?;
        }
        Ok(())
    }

    pub async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<Account>, ModelError> {
        Ok(Entity::find_by_id(id).one(db).await?.map(Account::from))
    }

    pub async fn all(db: &DatabaseConnection) -> Result<Vec<Account>, ModelError> {
        let rows = Entity::find().order_by_asc(Column::Id).all(db).await?;
        Ok(rows.into_iter().map(Account::from).collect())
    }

    pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> Result<Vec<Account>, ModelError> {
        let rows = Entity::find()
            .filter(Column::Name.eq(name))
            .order_by_asc(Column::Id)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(Account::from).collect())
    }
}

fn required_str(obj: &Map<String, JsonValue>, key: &str) -> Result<String, ModelError> {
    match obj.get(key) {
        None => Err(ModelError::Data(format!("missing {key}"))),
        Some(JsonValue::String(s)) if s.trim().is_empty() => {
            Err(ModelError::Data(format!("{key} must not be blank")))
        }
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(_) => Err(ModelError::Data(format!("{key} must be a string"))),
    }
}

fn optional_str(obj: &Map<String, JsonValue>, key: &str) -> Result<Option<String>, ModelError> {
    match obj.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ModelError::Data(format!("{key} must be a string"))),
    }
}
