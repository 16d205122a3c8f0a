//! GPU-конвейер умножения матриц
//!
//! Владеет всеми ресурсами OpenCL одного запуска бенчмарка. Каждый
//! ресурс завернут в RAII-обертку, поэтому освобождение происходит на
//! любом пути выхода, в том числе при ошибке на промежуточном шаге.

use crate::matrix::Matrix;
use crate::opencl::bindings::*;
use crate::opencl::types::*;
use crate::opencl::{load_kernel_source, GpuError};
use crate::{cl_check, cl_create};
use std::ffi::c_void;
use std::path::Path;
use std::ptr;

/// Имя точки входа в программе ядра
const KERNEL_NAME: &str = "MatrixMultiplication\0";

struct Context(cl_context);

impl Drop for Context {
    fn drop(&mut self) {
        unsafe {
            clReleaseContext(self.0);
        }
    }
}

struct CommandQueue(cl_command_queue);

impl Drop for CommandQueue {
    fn drop(&mut self) {
        unsafe {
            clReleaseCommandQueue(self.0);
        }
    }
}

struct Program(cl_program);

impl Drop for Program {
    fn drop(&mut self) {
        unsafe {
            clReleaseProgram(self.0);
        }
    }
}

struct Kernel(cl_kernel);

impl Drop for Kernel {
    fn drop(&mut self) {
        unsafe {
            clReleaseKernel(self.0);
        }
    }
}

/// RAII-обертка над буфером в памяти устройства
struct DeviceBuffer(cl_mem);

impl DeviceBuffer {
    fn new(context: cl_context, flags: cl_mem_flags, size: usize) -> Result<Self, GpuError> {
        let mut status = CL_SUCCESS;
        let mem = cl_create!(
            clCreateBuffer(context, flags, size, ptr::null_mut(), &mut status),
            status,
            GpuError::BufferAllocationFailed
        )?;
        Ok(Self(mem))
    }
}

impl Drop for DeviceBuffer {
    fn drop(&mut self) {
        unsafe {
            clReleaseMemObject(self.0);
        }
    }
}

/// Конвейер умножения матриц на GPU
///
/// Порядок полей задает порядок освобождения: ядро → программа →
/// очередь → контекст, то есть обратный порядку создания.
pub struct GpuMultiplier {
    kernel: Kernel,
    program: Program,
    command_queue: CommandQueue,
    context: Context,
    device: cl_device_id,
}

impl GpuMultiplier {
    /// Подготавливает конвейер: платформа → устройство → контекст →
    /// очередь → исходник → программа → ядро
    pub fn from_source_file(source_path: &Path) -> Result<Self, GpuError> {
        // Поиск платформы: нужна ровно одна запись
        let mut platform_ids = vec![ptr::null_mut(); 1];
        let mut num_platforms: cl_uint = 0;

        cl_check!(
            clGetPlatformIDs(1, platform_ids.as_mut_ptr(), &mut num_platforms),
            GpuError::PlatformUnavailable
        )?;
        if num_platforms == 0 {
            return Err(GpuError::PlatformUnavailable(CL_SUCCESS));
        }
        let platform = platform_ids[0];

        // Поиск GPU-устройства на найденной платформе
        let mut device_ids = vec![ptr::null_mut(); 1];
        let mut num_devices: cl_uint = 0;

        cl_check!(
            clGetDeviceIDs(
                platform,
                CL_DEVICE_TYPE_GPU,
                1,
                device_ids.as_mut_ptr(),
                &mut num_devices
            ),
            GpuError::DeviceUnavailable
        )?;
        if num_devices == 0 {
            return Err(GpuError::DeviceUnavailable(CL_SUCCESS));
        }
        let device = device_ids[0];

        let mut status = CL_SUCCESS;

        let context = Context(cl_create!(
            clCreateContext(ptr::null(), 1, &device, None, ptr::null_mut(), &mut status),
            status,
            GpuError::ContextCreationFailed
        )?);

        let command_queue = CommandQueue(cl_create!(
            clCreateCommandQueue(context.0, device, 0, &mut status),
            status,
            GpuError::QueueCreationFailed
        )?);

        // Загрузка исходника и компиляция под найденное устройство
        let source_text = load_kernel_source(source_path)?;
        let source = source_text.as_ptr() as *const i8;
        let source_len = source_text.len();

        let program = Program(cl_create!(
            clCreateProgramWithSource(context.0, 1, &source, &source_len, &mut status),
            status,
            |code| GpuError::BuildFailed {
                code,
                log: String::new(),
            }
        )?);

        let build_status =
            unsafe { clBuildProgram(program.0, 1, &device, ptr::null(), None, ptr::null_mut()) };
        if build_status != CL_SUCCESS {
            return Err(GpuError::BuildFailed {
                code: build_status,
                log: build_log(program.0, device),
            });
        }

        let kernel = Kernel(cl_create!(
            clCreateKernel(program.0, KERNEL_NAME.as_ptr() as *const i8, &mut status),
            status,
            GpuError::KernelResolutionFailed
        )?);

        Ok(Self {
            kernel,
            program,
            command_queue,
            context,
            device,
        })
    }

    /// Имя устройства, на котором выполняются вычисления
    pub fn device_name(&self) -> Result<String, GpuError> {
        let mut size = 0usize;
        cl_check!(
            clGetDeviceInfo(self.device, CL_DEVICE_NAME, 0, ptr::null_mut(), &mut size),
            GpuError::DeviceUnavailable
        )?;

        let mut name = vec![0u8; size];
        cl_check!(
            clGetDeviceInfo(
                self.device,
                CL_DEVICE_NAME,
                size,
                name.as_mut_ptr() as *mut c_void,
                ptr::null_mut()
            ),
            GpuError::DeviceUnavailable
        )?;

        while name.last() == Some(&0) {
            name.pop();
        }
        Ok(String::from_utf8_lossy(&name).into_owned())
    }

    /// Перемножает две матрицы на устройстве
    ///
    /// Фаза выполнения целиком: выделение буферов, блокирующая загрузка
    /// входов, привязка аргументов, запуск одномерной сетки по одному
    /// work-item на элемент результата и блокирующее чтение результата.
    /// Блокирующее чтение одновременно служит барьером завершения ядра.
    pub fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, GpuError> {
        let side = a.side();
        debug_assert_eq!(side, b.side());

        let elements = side * side;
        let bytes = elements * std::mem::size_of::<cl_int>();

        // Два входных буфера только на чтение, выходной только на запись
        let a_buffer = DeviceBuffer::new(self.context.0, CL_MEM_READ_ONLY, bytes)?;
        let b_buffer = DeviceBuffer::new(self.context.0, CL_MEM_READ_ONLY, bytes)?;
        let out_buffer = DeviceBuffer::new(self.context.0, CL_MEM_WRITE_ONLY, bytes)?;

        // Блокирующая загрузка входных матриц в порядке очереди
        cl_check!(
            clEnqueueWriteBuffer(
                self.command_queue.0,
                a_buffer.0,
                CL_TRUE,
                0,
                bytes,
                a.as_slice().as_ptr() as *const c_void,
                0,
                ptr::null(),
                ptr::null_mut()
            ),
            GpuError::TransferFailed
        )?;
        cl_check!(
            clEnqueueWriteBuffer(
                self.command_queue.0,
                b_buffer.0,
                CL_TRUE,
                0,
                bytes,
                b.as_slice().as_ptr() as *const c_void,
                0,
                ptr::null(),
                ptr::null_mut()
            ),
            GpuError::TransferFailed
        )?;

        // Аргументы ядра в фиксированном порядке: вход-1, вход-2,
        // выход, сторона
        cl_check!(
            clSetKernelArg(
                self.kernel.0,
                0,
                std::mem::size_of::<cl_mem>(),
                &a_buffer.0 as *const _ as *const c_void
            ),
            GpuError::DispatchFailed
        )?;
        cl_check!(
            clSetKernelArg(
                self.kernel.0,
                1,
                std::mem::size_of::<cl_mem>(),
                &b_buffer.0 as *const _ as *const c_void
            ),
            GpuError::DispatchFailed
        )?;
        cl_check!(
            clSetKernelArg(
                self.kernel.0,
                2,
                std::mem::size_of::<cl_mem>(),
                &out_buffer.0 as *const _ as *const c_void
            ),
            GpuError::DispatchFailed
        )?;

        let side_arg = side as cl_uint;
        cl_check!(
            clSetKernelArg(
                self.kernel.0,
                3,
                std::mem::size_of::<cl_uint>(),
                &side_arg as *const _ as *const c_void
            ),
            GpuError::DispatchFailed
        )?;

        // Одномерная сетка по числу элементов результата; размер
        // рабочей группы оставлен на выбор рантайма
        let global_work_size = [elements];
        cl_check!(
            clEnqueueNDRangeKernel(
                self.command_queue.0,
                self.kernel.0,
                1,
                ptr::null(),
                global_work_size.as_ptr(),
                ptr::null(),
                0,
                ptr::null(),
                ptr::null_mut()
            ),
            GpuError::DispatchFailed
        )?;

        let mut out = Matrix::zeroed(side);
        cl_check!(
            clEnqueueReadBuffer(
                self.command_queue.0,
                out_buffer.0,
                CL_TRUE,
                0,
                bytes,
                out.as_mut_slice().as_mut_ptr() as *mut c_void,
                0,
                ptr::null(),
                ptr::null_mut()
            ),
            GpuError::TransferFailed
        )?;

        Ok(out)
    }
}

/// Достает лог сборки программы для диагностики
fn build_log(program: cl_program, device: cl_device_id) -> String {
    let mut log_size = 0usize;
    let status = unsafe {
        clGetProgramBuildInfo(
            program,
            device,
            CL_PROGRAM_BUILD_LOG,
            0,
            ptr::null_mut(),
            &mut log_size,
        )
    };
    if status != CL_SUCCESS || log_size == 0 {
        return String::new();
    }

    let mut log = vec![0u8; log_size];
    let status = unsafe {
        clGetProgramBuildInfo(
            program,
            device,
            CL_PROGRAM_BUILD_LOG,
            log_size,
            log.as_mut_ptr() as *mut c_void,
            ptr::null_mut(),
        )
    };
    if status != CL_SUCCESS {
        return String::new();
    }

    String::from_utf8_lossy(&log)
        .trim_end_matches('\0')
        .trim()
        .to_string()
}
