//! Resolution of compiled contract artifacts by name.
//!
//! Both the Hardhat (`artifacts/contracts/Foo.sol/Foo.json`) and the Foundry
//! (`out/Foo.sol/Foo.json`) output layouts are understood.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use alloy::{
    json_abi::JsonAbi,
    primitives::{Bytes, hex},
};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::fs;
use tracing::debug;

use crate::error::ResolutionError;

/// Compiled bytecode plus ABI of a single contract.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    pub name: String,
    /// File the artifact was loaded from.
    pub source: PathBuf,
    pub abi: JsonAbi,
    /// Creation bytecode, without constructor arguments.
    pub bytecode: Bytes,
}

/// Turns a contract name into a deployable template.
#[async_trait]
pub trait ArtifactResolver: Send + Sync {
    async fn resolve(&self, name: &str) -> Result<ContractArtifact, ResolutionError>;
}

/// Artifacts below a build output directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find the unique `<Source>.sol/<name>.json` below the root.
    async fn find(&self, name: &str) -> Result<PathBuf, ResolutionError> {
        let file = format!("{name}.json");
        let mut candidates = Vec::new();
        let mut dirs = vec![self.root.clone()];

        while let Some(dir) = dirs.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == io::ErrorKind::NotFound && dir == self.root => {
                    return Err(self.not_found(name));
                }
                Err(e) => return Err(ResolutionError::Io(dir, e)),
            };
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| ResolutionError::Io(dir.clone(), e))?
            {
                let path = entry.path();
                let ty = entry
                    .file_type()
                    .await
                    .map_err(|e| ResolutionError::Io(path.clone(), e))?;
                if ty.is_dir() {
                    if entry.file_name() != "build-info" {
                        dirs.push(path)
                    }
                } else if entry.file_name() == file.as_str() && is_source_dir(&dir) {
                    candidates.push(path)
                }
            }
        }

        candidates.sort();
        match candidates.len() {
            0 => Err(self.not_found(name)),
            1 => Ok(candidates.remove(0)),
            _ => Err(ResolutionError::Ambiguous {
                name: name.to_string(),
                candidates,
            }),
        }
    }

    fn not_found(&self, name: &str) -> ResolutionError {
        ResolutionError::NotFound {
            name: name.to_string(),
            root: self.root.clone(),
        }
    }
}

#[async_trait]
impl ArtifactResolver for ArtifactStore {
    /// Accepts a bare contract name (`Auction`) or a fully qualified one
    /// (`contracts/Auction.sol:Auction`).
    async fn resolve(&self, name: &str) -> Result<ContractArtifact, ResolutionError> {
        let (path, contract) = match name.split_once(':') {
            Some((source, contract)) => {
                let path = self.root.join(source).join(format!("{contract}.json"));
                (path, contract)
            }
            None => (self.find(name).await?, name),
        };
        debug!(%name, path = %path.display(), "loading artifact");

        let json = match fs::read_to_string(&path).await {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(self.not_found(name)),
            Err(e) => return Err(ResolutionError::Io(path, e)),
        };
        parse_artifact(contract, path, &json)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactFile {
    abi: JsonAbi,
    bytecode: Bytecode,
    #[serde(default)]
    link_references: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Bytecode {
    /// Hardhat
    Hex(String),
    /// Foundry
    Object {
        object: String,
        #[serde(default, rename = "linkReferences")]
        link_references: BTreeMap<String, serde_json::Value>,
    },
}

fn parse_artifact(
    name: &str,
    path: PathBuf,
    json: &str,
) -> Result<ContractArtifact, ResolutionError> {
    let file: ArtifactFile = match serde_json::from_str(json) {
        Ok(f) => f,
        Err(e) => return Err(ResolutionError::Parse(path, e)),
    };

    let not_deployable = |reason: String| ResolutionError::NotDeployable {
        name: name.to_string(),
        reason,
    };

    let (code, links) = match &file.bytecode {
        Bytecode::Hex(code) => (code, &file.link_references),
        Bytecode::Object {
            object,
            link_references,
        } => (object, link_references),
    };
    if !links.is_empty() {
        let libs = links.keys().cloned().collect::<Vec<_>>().join(", ");
        return Err(not_deployable(format!("unlinked libraries in {libs}")));
    }

    let code = code.strip_prefix("0x").unwrap_or(code);
    if code.is_empty() {
        return Err(not_deployable(
            "empty bytecode (abstract contract or interface)".into(),
        ));
    }
    let bytecode =
        hex::decode(code).map_err(|e| not_deployable(format!("invalid bytecode: {e}")))?;

    Ok(ContractArtifact {
        name: name.to_string(),
        source: path,
        abi: file.abi,
        bytecode: bytecode.into(),
    })
}

fn is_source_dir(dir: &Path) -> bool {
    dir.extension().is_some_and(|ext| ext == "sol")
}
