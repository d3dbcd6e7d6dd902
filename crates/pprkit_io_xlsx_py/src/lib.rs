use std::collections::BTreeMap;
use std::path::PathBuf;

use pprkit_io_xlsx::{
    EnumRawCell, PprError, PprSession as RsPprSession, SpecExportOptions, SpecExportPayload,
    SpecExportReport, SpecPprRecord, SpecSessionOptions, normalize_rows,
};
use pyo3::exceptions::{PyIndexError, PyOSError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyAny, PyBool, PyFloat, PyInt, PyString};

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "pprkit.xlsx.session.v1";
const C_BRIDGE_TRANSPORT: &str = "rust_native";

#[pyclass(name = "PprRecord", frozen)]
#[derive(Debug, Clone)]
struct PyPprRecord {
    #[pyo3(get)]
    reference: String,
    #[pyo3(get)]
    line_number: String,
    #[pyo3(get)]
    isbn: String,
    #[pyo3(get)]
    status: String,
    #[pyo3(get)]
    result: String,
}

impl From<&SpecPprRecord> for PyPprRecord {
    fn from(record: &SpecPprRecord) -> Self {
        Self {
            reference: record.reference().to_string(),
            line_number: record.line_number().to_string(),
            isbn: record.isbn().to_string(),
            status: record.status().to_string(),
            result: record.result().to_string(),
        }
    }
}

#[pymethods]
impl PyPprRecord {
    fn to_dict(&self) -> BTreeMap<String, String> {
        let mut dict_fields = BTreeMap::new();
        dict_fields.insert("reference".to_string(), self.reference.clone());
        dict_fields.insert("line_number".to_string(), self.line_number.clone());
        dict_fields.insert("isbn".to_string(), self.isbn.clone());
        dict_fields.insert("status".to_string(), self.status.clone());
        dict_fields.insert("result".to_string(), self.result.clone());
        dict_fields
    }

    fn __repr__(&self) -> String {
        format!(
            "PprRecord(reference={:?}, line_number={:?}, isbn={:?}, status={:?}, result={:?})",
            self.reference, self.line_number, self.isbn, self.status, self.result
        )
    }
}

#[pyclass(name = "ExportPayload", frozen)]
#[derive(Debug, Clone)]
struct PyExportPayload {
    #[pyo3(get)]
    file_name: String,
    #[pyo3(get)]
    content: String,
    #[pyo3(get)]
    mime_type: String,
}

impl From<SpecExportPayload> for PyExportPayload {
    fn from(payload: SpecExportPayload) -> Self {
        Self {
            file_name: payload.file_name,
            content: payload.content,
            mime_type: payload.mime_type.to_string(),
        }
    }
}

#[pyclass(name = "ExportReport", frozen)]
#[derive(Debug, Clone)]
struct PyExportReport {
    #[pyo3(get)]
    file_out: String,
    #[pyo3(get)]
    cnt_records: usize,
    #[pyo3(get)]
    cnt_bytes: usize,
}

impl From<SpecExportReport> for PyExportReport {
    fn from(report: SpecExportReport) -> Self {
        Self {
            file_out: report.path_file_out.to_string_lossy().to_string(),
            cnt_records: report.cnt_records,
            cnt_bytes: report.cnt_bytes,
        }
    }
}

#[pymethods]
impl PyExportReport {
    fn __str__(&self) -> String {
        format!(
            "[EXPORT] file={} records={} bytes={}",
            self.file_out, self.cnt_records, self.cnt_bytes
        )
    }
}

#[pyclass(name = "PprSession")]
struct PyPprSession {
    inner: RsPprSession,
}

#[pymethods]
impl PyPprSession {
    #[new]
    #[pyo3(signature = (dir_output = ".", if_overwrite = true))]
    fn new(dir_output: &str, if_overwrite: bool) -> Self {
        let cfg_session_options = SpecSessionOptions {
            export: SpecExportOptions {
                dir_output: PathBuf::from(dir_output),
                if_overwrite,
            },
        };
        Self {
            inner: RsPprSession::new(cfg_session_options),
        }
    }

    #[getter]
    fn has_data(&self) -> bool {
        self.inner.has_data()
    }

    fn __len__(&self) -> usize {
        self.inner.records().len()
    }

    fn records(&self) -> Vec<PyPprRecord> {
        self.inner.records().iter().map(PyPprRecord::from).collect()
    }

    fn load_file(&mut self, py: Python<'_>, file_in: String) -> PyResult<usize> {
        let inner = &mut self.inner;
        py.allow_threads(|| inner.load_path(file_in))
            .map_err(map_ppr_error)
    }

    fn load_bytes(&mut self, py: Python<'_>, data: &[u8]) -> PyResult<usize> {
        let inner = &mut self.inner;
        py.allow_threads(|| inner.load_bytes(data))
            .map_err(map_ppr_error)
    }

    fn load_rows(&mut self, rows: &Bound<'_, PyAny>) -> PyResult<usize> {
        let l_rows = parse_raw_rows(rows)?;
        Ok(self.inner.load_rows(&l_rows))
    }

    fn delete_at(&mut self, position: usize) -> PyResult<PyPprRecord> {
        let record = self.inner.delete_at(position).map_err(map_ppr_error)?;
        Ok(PyPprRecord::from(&record))
    }

    fn delete_many(&mut self, positions: Vec<usize>) -> PyResult<usize> {
        self.inner.delete_many(&positions).map_err(map_ppr_error)
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn payload(&self) -> PyResult<PyExportPayload> {
        let payload = self.inner.payload().map_err(map_ppr_error)?;
        Ok(PyExportPayload::from(payload))
    }

    fn file_name(&self) -> PyResult<String> {
        let payload = self.inner.payload().map_err(map_ppr_error)?;
        Ok(payload.file_name)
    }

    #[pyo3(signature = (dir_output = None))]
    fn export(&self, py: Python<'_>, dir_output: Option<String>) -> PyResult<PyExportReport> {
        let inner = &self.inner;
        let report = py
            .allow_threads(|| match dir_output {
                Some(dir) => inner.export_to(dir),
                None => inner.export(),
            })
            .map_err(map_ppr_error)?;
        Ok(PyExportReport::from(report))
    }
}

fn map_ppr_error(exception: PprError) -> PyErr {
    match exception {
        PprError::IndexOutOfRange { .. } => PyIndexError::new_err(exception.to_string()),
        PprError::Io { .. } => PyOSError::new_err(exception.to_string()),
        PprError::DecodeFailure(_)
        | PprError::NoDataToExport
        | PprError::NoSelection
        | PprError::InvalidFileName(_) => PyValueError::new_err(exception.to_string()),
    }
}

fn parse_raw_cell(obj: &Bound<'_, PyAny>) -> PyResult<EnumRawCell> {
    if obj.is_none() {
        return Ok(EnumRawCell::None);
    }
    // `bool` subclasses `int` in Python.
    if obj.is_instance_of::<PyBool>() {
        return Ok(EnumRawCell::Boolean(obj.extract::<bool>()?));
    }
    if obj.is_instance_of::<PyInt>() {
        if let Ok(n) = obj.extract::<i64>() {
            return Ok(EnumRawCell::Number(n as f64));
        }
        return Ok(EnumRawCell::String(obj.str()?.to_string()));
    }
    if obj.is_instance_of::<PyFloat>() {
        return Ok(EnumRawCell::Number(obj.extract::<f64>()?));
    }
    if obj.is_instance_of::<PyString>() {
        return Ok(EnumRawCell::String(obj.extract::<String>()?));
    }
    if obj.hasattr("isoformat")? {
        let c_iso = obj.call_method0("isoformat")?.extract::<String>()?;
        return Ok(EnumRawCell::DateTime(c_iso));
    }
    Ok(EnumRawCell::String(obj.str()?.to_string()))
}

fn parse_raw_rows(rows: &Bound<'_, PyAny>) -> PyResult<Vec<Vec<EnumRawCell>>> {
    let mut l_rows = Vec::new();
    for row in rows.try_iter()? {
        let row = row?;
        let mut l_cells = Vec::new();
        for cell in row.try_iter()? {
            l_cells.push(parse_raw_cell(&cell?)?);
        }
        l_rows.push(l_cells);
    }
    Ok(l_rows)
}

#[pyfunction(name = "normalize_rows")]
fn normalize_rows_py(rows: &Bound<'_, PyAny>) -> PyResult<Vec<PyPprRecord>> {
    let l_rows = parse_raw_rows(rows)?;
    Ok(normalize_rows(&l_rows)
        .iter()
        .map(PyPprRecord::from)
        .collect())
}

#[pymodule]
fn _pprkit_io_xlsx_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PyPprRecord>()?;
    module.add_class::<PyExportPayload>()?;
    module.add_class::<PyExportReport>()?;
    module.add_class::<PyPprSession>()?;
    module.add_function(wrap_pyfunction!(normalize_rows_py, module)?)?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    module.add("__bridge_transport__", C_BRIDGE_TRANSPORT)?;
    Ok(())
}
