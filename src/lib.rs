//! nv - per-project environments with encrypted secrets.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── create        # Create an environment
//! │   ├── remove        # Remove an environment
//! │   ├── shell / run   # Launch inside an environment
//! │   ├── secrets       # Edit stored secrets
//! │   ├── keyring       # Manage cached passwords
//! │   └── status        # Describe an environment
//! └── core/             # Core library components
//!     ├── store/        # .nv directories, nv.json, environment.json
//!     ├── cipher/       # Disabled / password-sealed secrets
//!     ├── kdf           # scrypt key derivation
//!     ├── keyring       # Platform password cache
//!     ├── cloud/        # AWS profile credentials
//!     ├── toolchain     # Python virtual environments
//!     ├── compose       # Layered environment composition
//!     ├── exec          # Process replacement
//!     └── lifecycle     # Create / remove / edit operations
//! ```
//!
//! # Features
//!
//! - `aws` (default): resolve AWS profiles through the AWS SDK

pub mod cli;
pub mod core;
pub mod error;
