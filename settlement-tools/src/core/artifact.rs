// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled contract artifacts.
//!
//! Artifacts are produced by an external build step. Both the Hardhat layout
//! (`artifacts/contracts/<Source>.sol/<Name>.json`, bytecode as a hex string) and the Foundry
//! layout (`out/<Source>.sol/<Name>.json`, bytecode under `bytecode.object`) are understood.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    json_abi::{Constructor, JsonAbi},
    primitives::Bytes,
};
use serde::Deserialize;

use crate::utils::{color::Color, decode0x};

/// Directory name Hardhat uses for compiler inputs and outputs; never holds contract artifacts.
const BUILD_INFO_DIR: &str = "build-info";

/// Source of compiled contracts, looked up by name.
pub trait ArtifactResolver {
    fn resolve(&self, name: &str) -> Result<Artifact, ArtifactError>;
}

impl<T: ArtifactResolver + ?Sized> ArtifactResolver for &T {
    fn resolve(&self, name: &str) -> Result<Artifact, ArtifactError> {
        (**self).resolve(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact not found for contract {} in {}", .name.red(), .root.display())]
    NotFound { name: String, root: PathBuf },
    #[error(
        "multiple artifacts found for contract {}, use a fully qualified name: {}",
        .name.red(),
        .candidates.join(", ")
    )]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },
    #[error("contract {} has no deployable bytecode (is it abstract or an interface?)", .0.red())]
    MissingBytecode(String),
    #[error("contract {} needs linked libraries before it can be deployed", .0.red())]
    UnlinkedLibraries(String),
    #[error("invalid bytecode in {}", .path.display())]
    InvalidBytecode {
        path: PathBuf,
        #[source]
        source: hex::FromHexError,
    },
    #[error("failed to read artifact {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid artifact search pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// A compiled contract ready to be deployed.
#[derive(Debug, Clone)]
pub struct Artifact {
    contract_name: String,
    source_name: Option<String>,
    abi: JsonAbi,
    bytecode: Bytes,
    path: PathBuf,
}

impl Artifact {
    /// Reads the artifact at `path`. The file stem is used as the contract name when the
    /// artifact does not carry one.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_owned(),
            source,
        })?;
        let raw: RawArtifact =
            serde_json::from_str(&contents).map_err(|source| ArtifactError::Json {
                path: path.to_owned(),
                source,
            })?;

        let contract_name = raw.contract_name.clone().unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        let bytecode = raw.bytecode(&contract_name, path)?;
        Ok(Self {
            contract_name,
            source_name: raw.source_name,
            abi: raw.abi,
            bytecode,
            path: path.to_owned(),
        })
    }

    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        self.abi.constructor.as_ref()
    }

    /// Creation bytecode, without constructor arguments.
    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<source>:<name>` when the source is known, otherwise just the name. Foundry artifacts
    /// carry no source, so their output directory relative to the artifacts root is used.
    pub fn fully_qualified_name(&self) -> String {
        match &self.source_name {
            Some(source) => format!("{source}:{}", self.contract_name),
            None => self.contract_name.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: Option<String>,
    source_name: Option<String>,
    #[serde(default)]
    abi: JsonAbi,
    #[serde(default)]
    bytecode: Option<RawBytecode>,
    #[serde(default)]
    link_references: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    /// Hardhat
    Hex(String),
    /// Foundry
    Object {
        object: String,
        #[serde(default, rename = "linkReferences")]
        link_references: BTreeMap<String, serde_json::Value>,
    },
}

impl RawArtifact {
    fn bytecode(&self, name: &str, path: &Path) -> Result<Bytes, ArtifactError> {
        let (object, nested_links) = match &self.bytecode {
            None => return Err(ArtifactError::MissingBytecode(name.to_owned())),
            Some(RawBytecode::Hex(hex)) => (hex.as_str(), None),
            Some(RawBytecode::Object {
                object,
                link_references,
            }) => (object.as_str(), Some(link_references)),
        };

        // Library placeholders look like `__$<hash>$__`; hex never contains underscores.
        let unlinked = !self.link_references.is_empty()
            || nested_links.is_some_and(|links| !links.is_empty())
            || object.contains('_');
        if unlinked {
            return Err(ArtifactError::UnlinkedLibraries(name.to_owned()));
        }

        let code = decode0x(object).map_err(|source| ArtifactError::InvalidBytecode {
            path: path.to_owned(),
            source,
        })?;
        if code.is_empty() {
            return Err(ArtifactError::MissingBytecode(name.to_owned()));
        }
        Ok(code.into())
    }
}

/// Resolves artifacts from a build output directory such as `artifacts/` or `out/`.
#[derive(Debug, Clone)]
pub struct ArtifactDir {
    root: PathBuf,
}

impl ArtifactDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `contracts/Settlement.sol:Settlement` maps straight to its artifact file. The source is
    /// relative to the artifacts root.
    fn resolve_qualified(&self, source: &str, name: &str) -> Result<Artifact, ArtifactError> {
        let path = self.root.join(source).join(format!("{name}.json"));
        if !path.is_file() {
            return Err(ArtifactError::NotFound {
                name: format!("{source}:{name}"),
                root: self.root.clone(),
            });
        }
        self.load(&path)
    }

    fn load(&self, path: &Path) -> Result<Artifact, ArtifactError> {
        let mut artifact = Artifact::from_file(path)?;
        if artifact.source_name.is_none() {
            artifact.source_name = self.source_dir(path);
        }
        Ok(artifact)
    }

    /// `<root>/v2/Settlement.sol/Settlement.json` has source `v2/Settlement.sol`.
    fn source_dir(&self, path: &Path) -> Option<String> {
        let dir = path.parent()?.strip_prefix(&self.root).ok()?;
        let source = dir
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        (!source.is_empty()).then_some(source)
    }

    fn candidates(&self, name: &str) -> Result<Vec<PathBuf>, ArtifactError> {
        let pattern = format!(
            "{}/**/{}.json",
            glob::Pattern::escape(&self.root.to_string_lossy()),
            glob::Pattern::escape(name),
        );
        let mut paths: Vec<PathBuf> = glob::glob(&pattern)?
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .filter(|path| {
                !path
                    .components()
                    .any(|c| c.as_os_str() == BUILD_INFO_DIR)
            })
            .collect();
        paths.sort();
        Ok(paths)
    }
}

impl ArtifactResolver for ArtifactDir {
    fn resolve(&self, name: &str) -> Result<Artifact, ArtifactError> {
        let name = name.trim();
        if let Some((source, contract)) = name.rsplit_once(':') {
            return self.resolve_qualified(source, contract);
        }

        let mut found = Vec::new();
        for path in self.candidates(name)? {
            let artifact = self.load(&path)?;
            if artifact.contract_name() == name {
                found.push(artifact);
            }
        }

        match found.len() {
            0 => Err(ArtifactError::NotFound {
                name: name.to_owned(),
                root: self.root.clone(),
            }),
            1 => Ok(found.remove(0)),
            _ => Err(ArtifactError::Ambiguous {
                name: name.to_owned(),
                candidates: found.iter().map(Artifact::fully_qualified_name).collect(),
            }),
        }
    }
}
