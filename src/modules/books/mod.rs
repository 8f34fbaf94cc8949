pub mod models;
pub mod routes;
pub mod store;
pub mod validation;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;
use shelf_kernel::{InitCtx, Migration, Module};

use routes::SharedStore;

/// Book catalogue resource: create, list, fetch, replace and delete books
/// keyed by isbn.
pub struct BooksModule {
    store: SharedStore,
}

impl BooksModule {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            backend = ?ctx.backend(),
            applied_migrations = ctx.applied_migrations,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let single = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/BookResponse" }
                    }
                }
            })
        };
        let isbn_param = json!({
            "name": "isbn",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        });
        let book_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Book" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "All books ordered by title",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/BookListResponse" }
                                    }
                                }
                            },
                            "500": error("Internal server error")
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": book_body,
                        "responses": {
                            "201": single("Book created"),
                            "400": error("Payload failed validation"),
                            "409": error("A book with this isbn already exists"),
                            "500": error("Internal server error")
                        }
                    }
                },
                "/{isbn}": {
                    "get": {
                        "summary": "Fetch a book by isbn",
                        "tags": ["Books"],
                        "parameters": [isbn_param],
                        "responses": {
                            "200": single("The book"),
                            "404": error("No book with this isbn")
                        }
                    },
                    "put": {
                        "summary": "Replace a book",
                        "tags": ["Books"],
                        "parameters": [isbn_param],
                        "requestBody": book_body,
                        "responses": {
                            "200": single("Book replaced"),
                            "400": error("Payload failed validation"),
                            "404": error("No book with this isbn")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [isbn_param],
                        "responses": {
                            "200": {
                                "description": "Book deleted",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": { "message": { "type": "string" } },
                                            "required": ["message"]
                                        }
                                    }
                                }
                            },
                            "404": error("No book with this isbn")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "additionalProperties": false,
                        "properties": {
                            "isbn": { "type": "string", "minLength": 1 },
                            "amazon_url": { "type": "string", "format": "uri" },
                            "author": { "type": "string" },
                            "language": { "type": "string" },
                            "pages": { "type": "integer", "format": "int32", "minimum": 1 },
                            "publisher": { "type": "string" },
                            "title": { "type": "string", "minLength": 1 },
                            "year": { "type": "integer", "format": "int32" }
                        },
                        "required": [
                            "isbn", "amazon_url", "author", "language",
                            "pages", "publisher", "title", "year"
                        ]
                    },
                    "BookResponse": {
                        "type": "object",
                        "properties": { "book": { "$ref": "#/components/schemas/Book" } },
                        "required": ["book"]
                    },
                    "BookListResponse": {
                        "type": "object",
                        "properties": {
                            "books": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            }
                        },
                        "required": ["books"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_create_books",
            up: r#"
                CREATE TABLE IF NOT EXISTS books (
                    isbn       TEXT    PRIMARY KEY,
                    amazon_url TEXT    NOT NULL,
                    author     TEXT    NOT NULL,
                    language   TEXT    NOT NULL,
                    pages      INTEGER NOT NULL CHECK (pages > 0),
                    publisher  TEXT    NOT NULL,
                    title      TEXT    NOT NULL CHECK (title <> ''),
                    year       INTEGER NOT NULL
                );
                "#,
        }]
    }

    async fn shutdown(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module over `store`
pub fn create_module(store: SharedStore) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use store::MemoryBookStore;

    fn module() -> BooksModule {
        BooksModule::new(Arc::new(MemoryBookStore::new()))
    }

    #[test]
    fn openapi_covers_every_operation() {
        let spec = module().openapi().unwrap();
        let paths = &spec["paths"];
        for (path, method) in [
            ("/", "get"),
            ("/", "post"),
            ("/{isbn}", "get"),
            ("/{isbn}", "put"),
            ("/{isbn}", "delete"),
        ] {
            assert!(
                paths[path][method]["responses"].is_object(),
                "missing {method} {path}"
            );
        }
        assert!(paths["/{isbn}"]["put"]["responses"]["400"].is_object());
        assert!(paths["/{isbn}"]["put"]["responses"]["404"].is_object());
        assert!(paths["/{isbn}"]["put"]["responses"]["409"].is_null());
    }

    #[test]
    fn book_schema_lists_every_field() {
        let spec = module().openapi().unwrap();
        let required = spec["components"]["schemas"]["Book"]["required"]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(required, 8);
    }

    #[tokio::test]
    async fn init_and_shutdown_succeed_on_memory_backend() {
        let settings = shelf_kernel::Settings::default();
        let module = module();

        module.init(&InitCtx::new(&settings, 0)).await.unwrap();
        module.shutdown().await.unwrap();
    }

    #[test]
    fn contributes_books_table_migration() {
        let migrations = module().migrations();
        assert_eq!(migrations.len(), 1);
        assert_eq!(migrations[0].id, "001_create_books");
        assert!(migrations[0].up.contains("isbn       TEXT    PRIMARY KEY"));
    }
}
