// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific utilities.
//!
//! Everything here is raw SQL that Diesel's DSL cannot express:
//! PRAGMA statements and `last_insert_rowid()`. Queries and mutations
//! live in `queries/` and `mutations/`.

pub mod sqlite;
