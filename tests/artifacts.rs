use simple_swap_kit::{
    AppError,
    artifacts::{ArtifactStore, ContractKind},
    cli::{self, ContractArg},
    config::AppConfig,
};
use std::fs;
use std::path::Path;

const SIMPLE_SWAP_ARTIFACT: &str = r#"{
  "_format": "hh-sol-artifact-1",
  "contractName": "SimpleSwap",
  "sourceName": "contracts/SimpleSwap.sol",
  "abi": [
    {
      "inputs": [],
      "name": "wmatic",
      "outputs": [{ "internalType": "address", "name": "", "type": "address" }],
      "stateMutability": "view",
      "type": "function"
    },
    {
      "inputs": [
        {
          "components": [
            { "internalType": "address", "name": "token0", "type": "address" },
            { "internalType": "address", "name": "token1", "type": "address" },
            { "internalType": "uint256", "name": "amountIn", "type": "uint256" },
            { "internalType": "enum SimpleSwap.FeeTier", "name": "feeTier", "type": "uint8" }
          ],
          "internalType": "struct SimpleSwap.SwapRequest",
          "name": "req",
          "type": "tuple"
        }
      ],
      "name": "swapMaticToToken",
      "outputs": [],
      "stateMutability": "payable",
      "type": "function"
    }
  ],
  "bytecode": "0x6080604052",
  "deployedBytecode": "0x6080",
  "linkReferences": {},
  "deployedLinkReferences": {}
}"#;

const TOKEN_ABI: &str = r#"[
  {
    "constant": true,
    "inputs": [{ "name": "owner", "type": "address" }],
    "name": "balanceOf",
    "outputs": [{ "name": "", "type": "uint256" }],
    "payable": false,
    "stateMutability": "view",
    "type": "function"
  }
]"#;

fn write_project(root: &Path) {
    let artifact_dir = root.join("artifacts/contracts/SimpleSwap.sol");
    fs::create_dir_all(&artifact_dir).unwrap();
    fs::write(artifact_dir.join("SimpleSwap.json"), SIMPLE_SWAP_ARTIFACT).unwrap();

    let utils_dir = root.join("utils");
    fs::create_dir_all(&utils_dir).unwrap();
    fs::write(utils_dir.join("WrappedToken.json"), TOKEN_ABI).unwrap();
}

#[test]
fn loads_hardhat_artifact() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    let store = ArtifactStore::new(dir.path());
    let artifact = store.load(ContractKind::SimpleSwap).unwrap();
    assert_eq!(artifact.function_names(), vec!["swapMaticToToken", "wmatic"]);
    assert_eq!(artifact.bytecode.to_vec(), vec![0x60, 0x80, 0x60, 0x40, 0x52]);
    assert!(artifact.deployment_tx().is_ok());
}

#[test]
fn loads_token_abi() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    let abi = ArtifactStore::new(dir.path()).token_abi().unwrap();
    assert!(abi.function("balanceOf").is_ok());
}

#[test]
fn missing_artifact_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ArtifactStore::new(dir.path())
        .load(ContractKind::SimpleSwap)
        .unwrap_err();
    assert!(matches!(err, AppError::Io(_)));
}

#[test]
fn malformed_artifact_is_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let artifact_dir = dir.path().join("artifacts/contracts/SimpleSwap.sol");
    fs::create_dir_all(&artifact_dir).unwrap();
    fs::write(artifact_dir.join("SimpleSwap.json"), "{ \"abi\": 5 }").unwrap();

    let err = ArtifactStore::new(dir.path())
        .load(ContractKind::SimpleSwap)
        .unwrap_err();
    assert!(matches!(err, AppError::SerdeJson(_)));
}

#[test]
fn artifact_command_uses_project_root() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());
    let root = dir.path().to_string_lossy().into_owned();

    let cfg = AppConfig::from_lookup(|key| (key == "PROJECT_ROOT").then(|| root.clone())).unwrap();
    let report = cli::run_artifact(ContractArg::SimpleSwap, &cfg).unwrap();
    assert_eq!(report.bytecode_len, 5);
    assert_eq!(report.functions, vec!["swapMaticToToken", "wmatic"]);
}
