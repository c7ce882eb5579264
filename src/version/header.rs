// src/version/header.rs

use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::version::VersionInfo;

const HEADER_TEMPLATE: &str = r##"/******************************************************************************
 * @section DESCRIPTION
 *
 * Header file for build time metadata
 *
 * @section LICENSE
 *
 * The Variable Infiltration Capacity (VIC) macroscale hydrological model
 * Copyright (C) 2014 The Land Surface Hydrology Group, Department of Civil
 * and Environmental Engineering, University of Washington.
 *
 * The VIC model is free software; you can redistribute it and/or
 * modify it under the terms of the GNU General Public License
 * as published by the Free Software Foundation; either version 2
 * of the License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License along with
 * this program; if not, write to the Free Software Foundation, Inc.,
 * 51 Franklin Street, Fifth Floor, Boston, MA  02110-1301, USA.
 *****************************************************************************/

#ifndef VIC_VERSION_H
#define VIC_VERSION_H

#define STR_HELPER(x) #x
#define STR(x) STR_HELPER(x)

#define VERSION "@VERSION@"
#define SHORT_VERSION "@SHORT_VERSION@"
#define GIT_TAG "@GIT_TAG@"

#define BUILD_DATE __DATE__
#define BUILD_TIME __TIME__

/* Get compiler metadata */
#if defined(__clang__)
# define COMPILER "clang"
# define COMPILER_VERSION __clang_version__

#elif defined(__ICC) || defined(__INTEL_COMPILER)
# define COMPILER "icc"
# define COMPILER_VERSION __VERSION__

#elif defined(__GNUC__) || defined(__GNUG__)
# define COMPILER "gcc"
# define COMPILER_VERSION STR(__GNUC__) "." STR(__GNUC_MINOR__) "." STR(__GNUC_PATCHLEVEL__)

#elif defined(__PGI)
# define COMPILER "pgcc"
# define COMPILER_VERSION STR(__PGIC__) "." STR(__PGIC_MINOR__) "." STR(__PGIC_PATCHLEVEL__)

#elif defined(__SUNPRO_C) || defined(__SUNPRO_CC)
# define COMPILER "suncc"
# define COMPILER_VERSION STR(__SUNPRO_C)
#endif
#ifndef COMPILER
# define COMPILER "unknown"
# define COMPILER_VERSION "unknown"
#endif

/* C Standard */
#ifdef __STDC_VERSION__
# define CSTANDARD __STDC_VERSION__
#endif
#ifndef CSTANDARD
# define CSTANDARD "unknown"
#endif

/* Platform */
#ifdef __APPLE__
# define PLATFORM "APPLE"
#elif __linux__
# define PLATFORM "LINUX"
#elif __unix__
# define PLATFORM "UNIX"
#endif
#ifndef PLATFORM
# define PLATFORM "unknown"
#endif

#endif
"##;

/// Render `version.h` for `version`.
pub fn render_header(version: &VersionInfo) -> String {
    HEADER_TEMPLATE
        .replace("@VERSION@", &c_string_escape(&version.full))
        .replace("@SHORT_VERSION@", &c_string_escape(&version.short))
        .replace("@GIT_TAG@", &c_string_escape(&version.tag))
}

/// Overwrite `path` with `header`, creating parent directories if needed.
pub fn write_header(fs: &dyn FileSystem, path: &Path, header: &str) -> Result<()> {
    fs.write(path, header.as_bytes())
        .with_context(|| format!("writing version header {}", path.display()))?;
    info!(path = %path.display(), "wrote version header");
    Ok(())
}

/// Escape a value for use inside a C string literal.
fn c_string_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}
