pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use libris_kernel::{InitCtx, Migration, Module};
use serde_json::json;

use repository::BookRepository;
use routes::BooksState;
use schema::SchemaValidator;

/// Books module: CRUD over the book table with schema-checked writes
pub struct BooksModule {
    state: BooksState,
}

impl BooksModule {
    /// Build the module around an injected repository.
    ///
    /// Compiles the book schema, so a malformed schema document fails
    /// startup instead of surfacing per request.
    pub fn new(repo: Arc<dyn BookRepository>) -> anyhow::Result<Self> {
        let validator = Arc::new(SchemaValidator::for_books()?);
        Ok(Self {
            state: BooksState { repo, validator },
        })
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
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(routes::list_books).post(routes::create_book))
            .route(
                "/{isbn}",
                get(routes::get_book)
                    .put(routes::update_book)
                    .delete(routes::delete_book),
            )
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "All books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "books": {
                                                    "type": "array",
                                                    "items": {
                                                        "$ref": "#/components/schemas/Book"
                                                    }
                                                }
                                            },
                                            "required": ["books"]
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/Book"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Created book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BookEnvelope"
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Schema validation failed",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{isbn}": {
                    "get": {
                        "summary": "Get a book by isbn",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "isbn",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "The book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BookEnvelope"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "No book with that isbn",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "put": {
                        "summary": "Replace a book",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "isbn",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/Book"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Replaced book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BookEnvelope"
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Schema validation failed",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "No book with that isbn",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "isbn",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Deleted",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "message": { "type": "string" }
                                            },
                                            "required": ["message"]
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "No book with that isbn",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "isbn": {
                                "type": "string",
                                "description": "Unique identifier for the book"
                            },
                            "amazon_url": {
                                "type": "string",
                                "format": "uri"
                            },
                            "author": {
                                "type": "string"
                            },
                            "language": {
                                "type": "string"
                            },
                            "pages": {
                                "type": "integer",
                                "minimum": 1
                            },
                            "publisher": {
                                "type": "string"
                            },
                            "title": {
                                "type": "string"
                            },
                            "year": {
                                "type": "integer"
                            }
                        },
                        "required": [
                            "isbn", "amazon_url", "author", "language",
                            "pages", "publisher", "title", "year"
                        ]
                    },
                    "BookEnvelope": {
                        "type": "object",
                        "properties": {
                            "book": {
                                "$ref": "#/components/schemas/Book"
                            }
                        },
                        "required": ["book"]
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
                    isbn        text PRIMARY KEY,
                    amazon_url  text NOT NULL,
                    author      text NOT NULL,
                    language    text NOT NULL,
                    pages       integer NOT NULL CHECK (pages > 0),
                    publisher   text NOT NULL,
                    title       text NOT NULL,
                    year        integer NOT NULL
                );
                "#,
        }]
    }
}

/// Create a new instance of the books module
pub fn create_module(repo: Arc<dyn BookRepository>) -> anyhow::Result<Arc<dyn Module>> {
    Ok(Arc::new(BooksModule::new(repo)?))
}
