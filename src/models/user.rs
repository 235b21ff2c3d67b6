use diesel::prelude::*;
use jiff_diesel::DateTime;
use uuid::Uuid;

/// Marketplace account. The password column holds an Argon2 PHC string.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<NewUser> for User {
    fn from(new: NewUser) -> Self {
        Self {
            id: new.id,
            name: new.name,
            email: new.email,
            password: new.password,
            is_deleted: new.is_deleted,
            created_at: new.created_at,
            updated_at: new.updated_at,
        }
    }
}

impl User {
    pub fn apply(&mut self, changes: UpdateUser) {
        if changes.name.is_some() {
            self.name = changes.name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(password) = changes.password {
            self.password = password;
        }
    }
}
