use rand::Rng;
use thiserror::Error;

#[derive(Error,Debug,Clone,PartialEq)]
pub enum MatrixError {
    #[error("Matrix size is:{matrix_size:?},but index at {accessed_index:?} was accessed")]
    IndexOutOfBounds{matrix_size:(usize,usize),accessed_index:(usize,usize)},
    #[error("This operation requires ({row},{col}) to be square, which isn't")]
    NonSquareError{row:usize,col:usize},
    #[error("attempted to create {row}*{col} matrix from vector/iterator with length {len}")]
    SizeMisMatch{row:usize,col:usize,len:usize},
    #[error("row {row} has {len} elements, expected {expected}")]
    RaggedRows{row:usize,len:usize,expected:usize},
}

type Result<T> = std::result::Result<T,MatrixError>;

// A double precision matrix, row major order
// which means rows are stored continuously
#[derive(Clone,Debug,PartialEq)]
pub struct Matrix {
    row_count:usize,
    col_count:usize,
    //row*col must equal elements.len()
    // otherwise invariants are broken, panics allowed
    elements:Vec<f64>
}

impl Default for Matrix {
    fn default() -> Self {
        Self {
            row_count:0,
            col_count:0,
            elements:vec![]
        }
    }
}

impl Matrix {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn new_with_vec(v:Vec<f64>,row:usize,col:usize) -> Result<Self> {
        if row*col != v.len() {
            return Err(MatrixError::SizeMisMatch { row, col,len: v.len() })
        }
        if row*col == 0 {
            return Ok(Self::default())
        }
        Ok(Self { row_count: row, col_count: col, elements: v })
    }
    // every row must be as long as the first one
    pub fn from_rows<R:AsRef<[f64]>>(rows:&[R]) -> Result<Self> {
        let Some(first) = rows.first() else {return Ok(Self::default())};
        let col = first.as_ref().len();
        let mut elements = Vec::with_capacity(rows.len()*col);
        for (row,values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != col {
                return Err(MatrixError::RaggedRows { row, len: values.len(), expected: col })
            }
            elements.extend_from_slice(values);
        }
        Self::new_with_vec(elements, rows.len(), col)
    }
    pub fn filled(row:usize,col:usize,value:f64) -> Self {
        if row*col == 0 {
            return Self::default()
        }
        Self {
            row_count:row,
            col_count:col,
            elements:vec![value;row*col]
        }
    }
    pub fn zeros(row:usize,col:usize) -> Self {
        Self::filled(row, col, 0.0)
    }
    // uniform samples in [low,high]
    pub fn rand<T:Rng>(row:usize,col:usize,low:f64,high:f64,rng:&mut T) -> Self {
        if row*col == 0 {
            return Self::default()
        }
        let mut dest = Vec::with_capacity(row*col);
        for _ in 0..row*col {
            dest.push(rng.random_range(low..=high));
        }
        debug_assert_eq!(dest.len(),row*col);
        Self {
            row_count:row,
            col_count:col,
            elements:dest
        }
    }
    pub fn get(&self,row:usize,col:usize) -> Result<f64> {
        debug_assert_eq!(self.row_count*self.col_count,self.elements.len());
        let out_of_bounds = MatrixError::IndexOutOfBounds { matrix_size:
            (self.row_count,self.col_count),
            accessed_index: (row,col)
        };
        if row >= self.row_count || col >= self.col_count {
            return Err(out_of_bounds)
        }
        self.elements.get(row*self.col_count + col).copied().ok_or(out_of_bounds)
    }
    pub fn get_mut(&mut self,row:usize,col:usize) -> Result<&mut f64> {
        debug_assert_eq!(self.row_count*self.col_count,self.elements.len());
        let out_of_bounds = MatrixError::IndexOutOfBounds { matrix_size:
            (self.row_count,self.col_count),
            accessed_index: (row,col)
        };
        if row >= self.row_count || col >= self.col_count {
            return Err(out_of_bounds)
        }
        self.elements.get_mut(row*self.col_count + col).ok_or(out_of_bounds)
    }
    pub fn set(&mut self,row:usize,col:usize,value:f64) -> Result<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }
    // callers must have checked the bounds already, e.g. through a validated network model
    pub(crate) fn at(&self,row:usize,col:usize) -> f64 {
        debug_assert!(row < self.row_count && col < self.col_count);
        self.elements[row*self.col_count + col]
    }
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks panics on 0, empty matrices have no rows anyway
        self.elements.chunks(self.col_count.max(1))
    }
    pub fn fill_diagonal(&mut self,value:f64) -> Result<()> {
        if !self.is_square() {
            return Err(MatrixError::NonSquareError { row: self.row_count, col: self.col_count })
        }
        for i in 0..self.row_count {
            self.elements[i*self.col_count + i] = value;
        }
        Ok(())
    }
    // largest element, None for an empty matrix
    pub fn max_element(&self) -> Option<f64> {
        self.elements.iter().copied().reduce(f64::max)
    }
    pub fn is_empty(&self) -> bool {
        self.col_count == 0 || self.row_count == 0 || self.elements.is_empty()
    }
    pub fn is_square(&self) -> bool {
        self.row_count == self.col_count
    }
    pub fn dimension(&self) -> (usize,usize) {
        if self.is_empty() {return (0,0)}
        (self.row_count,self.col_count)
    }
}
