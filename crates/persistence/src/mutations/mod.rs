// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for the persistence layer.
//!
//! Functions here perform single writes on a connection the caller
//! supplies. Multi-step operations compose them inside one transaction
//! in the `Persistence` adapter.

pub mod attendance;
pub mod catalog;
pub mod documents;
pub mod employees;
pub mod leave;
pub mod logs;
pub mod notifications;
pub mod projects;
pub mod salary;
pub mod skills;
