//
//  cms-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Bearer-token authentication for the content API.
//!
//! ## Module Structure
//!
//! - [`token`]: The [`ApiToken`] wrapper and token format validation

mod token;

pub use token::*;
