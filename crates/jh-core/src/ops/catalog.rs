use super::{
    Operation, OperationDescriptor, ParamDefault, ParamKind, ParamLocation, ParamSpec,
};

const LOG_TYPES: &[&str] = &[
    "stdout",
    "stderr",
    "syslog",
    "syslog.shuffle",
    "prelaunch.out",
    "prelaunch.err",
    "container-localizer-syslog",
];
const JOB_STATES: &[&str] = &[
    "NEW",
    "INITED",
    "RUNNING",
    "SUCCEEDED",
    "FAILED",
    "KILL_WAIT",
    "KILLED",
    "ERROR",
];
const TASK_TYPES: &[&str] = &["m", "r"];
const FORMATS: &[&str] = &["markdown", "json"];

const RESPONSE_FORMAT: ParamSpec = ParamSpec {
    name: "response_format",
    kind: ParamKind::Choice(FORMATS),
    location: ParamLocation::Local,
    required: false,
    default: Some(ParamDefault::Str("markdown")),
    description: "Output format: 'markdown' for humans, 'json' for programs.",
};
const JOB_ID: ParamSpec = ParamSpec {
    name: "job_id",
    kind: ParamKind::Id,
    location: ParamLocation::Path,
    required: true,
    default: None,
    description: "Job id, e.g. 'job_1326381300833_2_2'.",
};
const TASK_ID: ParamSpec = ParamSpec {
    name: "task_id",
    kind: ParamKind::Id,
    location: ParamLocation::Path,
    required: true,
    default: None,
    description: "Task id, e.g. 'task_1326381300833_2_2_m_0'.",
};
const ATTEMPT_ID: ParamSpec = ParamSpec {
    name: "attempt_id",
    kind: ParamKind::Id,
    location: ParamLocation::Path,
    required: true,
    default: None,
    description: "Task attempt id, e.g. 'attempt_1326381300833_2_2_m_0_0'.",
};

const fn time_filter(name: &'static str, wire: &'static str, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind: ParamKind::Integer {
            min: Some(0),
            max: None,
        },
        location: ParamLocation::Query(wire),
        required: false,
        default: None,
        description,
    }
}

const fn log_type(default: &'static str) -> ParamSpec {
    ParamSpec {
        name: "log_type",
        kind: ParamKind::Choice(LOG_TYPES),
        location: ParamLocation::Local,
        required: false,
        default: Some(ParamDefault::Str(default)),
        description: "Log stream: stdout, stderr, syslog, syslog.shuffle, prelaunch.out, \
                      prelaunch.err or container-localizer-syslog.",
    }
}

static INFO: OperationDescriptor = OperationDescriptor {
    name: "jobhistory_get_info",
    title: "History server info",
    description: "Basic information about the JobHistory server: start time, Hadoop version and \
                  build. Doubles as a health check.",
    endpoint: Some("info"),
    params: &[RESPONSE_FORMAT],
};

static LIST_JOBS: OperationDescriptor = OperationDescriptor {
    name: "jobhistory_list_jobs",
    title: "List MapReduce jobs",
    description: "List finished MapReduce jobs, optionally filtered by user, state, queue and \
                  start/finish time ranges (epoch milliseconds). Returns at most `limit` jobs.",
    endpoint: Some("mapreduce/jobs"),
    params: &[
        ParamSpec {
            name: "user",
            kind: ParamKind::Text,
            location: ParamLocation::Query("user"),
            required: false,
            default: None,
            description: "Only jobs submitted by this user.",
        },
        ParamSpec {
            name: "state",
            kind: ParamKind::Choice(JOB_STATES),
            location: ParamLocation::Query("state"),
            required: false,
            default: None,
            description: "Only jobs in this state.",
        },
        ParamSpec {
            name: "queue",
            kind: ParamKind::Text,
            location: ParamLocation::Query("queue"),
            required: false,
            default: None,
            description: "Only jobs submitted to this queue.",
        },
        ParamSpec {
            name: "limit",
            kind: ParamKind::Integer {
                min: Some(1),
                max: Some(100),
            },
            location: ParamLocation::Query("limit"),
            required: false,
            default: Some(ParamDefault::Int(20)),
            description: "Maximum number of jobs to return (1-100).",
        },
        time_filter(
            "started_time_begin",
            "startedTimeBegin",
            "Jobs started at or after this time (epoch ms).",
        ),
        time_filter(
            "started_time_end",
            "startedTimeEnd",
            "Jobs started at or before this time (epoch ms).",
        ),
        time_filter(
            "finished_time_begin",
            "finishedTimeBegin",
            "Jobs finished at or after this time (epoch ms).",
        ),
        time_filter(
            "finished_time_end",
            "finishedTimeEnd",
            "Jobs finished at or before this time (epoch ms).",
        ),
        RESPONSE_FORMAT,
    ],
};

static GET_JOB: OperationDescriptor = OperationDescriptor {
    name: "jobhistory_get_job",
    title: "Job details",
    description: "Full metadata of one job: identity, timing, map/reduce statistics, average \
                  phase times, diagnostics and ACLs.",
    endpoint: Some("mapreduce/jobs/{job_id}"),
    params: &[JOB_ID, RESPONSE_FORMAT],
};

static GET_JOB_COUNTERS: OperationDescriptor = OperationDescriptor {
    name: "jobhistory_get_job_counters",
    title: "Job counters",
    description: "All counters of a job, grouped (file system, task, shuffle errors, custom).",
    endpoint: Some("mapreduce/jobs/{job_id}/counters"),
    params: &[JOB_ID, RESPONSE_FORMAT],
};

static GET_JOB_CONF: OperationDescriptor = OperationDescriptor {
    name: "jobhistory_get_job_conf",
    title: "Job configuration",
    description: "Configuration the job ran with. `filter_key` keeps only properties whose name \
                  contains it (case-insensitive).",
    endpoint: Some("mapreduce/jobs/{job_id}/conf"),
    params: &[
        JOB_ID,
        ParamSpec {
            name: "filter_key",
            kind: ParamKind::Text,
            location: ParamLocation::Local,
            required: false,
            default: None,
            description: "Substring of the property name, e.g. 'mapreduce'.",
        },
        RESPONSE_FORMAT,
    ],
};

static GET_JOB_ATTEMPTS: OperationDescriptor = OperationDescriptor {
    name: "jobhistory_get_job_attempts",
    title: "Job ApplicationMaster attempts",
    description: "ApplicationMaster attempts of a job; a new attempt is started each time the AM \
                  fails.",
    endpoint: Some("mapreduce/jobs/{job_id}/jobattempts"),
    params: &[JOB_ID, RESPONSE_FORMAT],
};

static LIST_TASKS: OperationDescriptor = OperationDescriptor {
    name: "jobhistory_list_tasks",
    title: "List job tasks",
    description: "Tasks of a job, optionally only map ('m') or reduce ('r') tasks.",
    endpoint: Some("mapreduce/jobs/{job_id}/tasks"),
    params: &[
        JOB_ID,
        ParamSpec {
            name: "task_type",
            kind: ParamKind::Choice(TASK_TYPES),
            location: ParamLocation::Query("type"),
            required: false,
            default: None,
            description: "'m' for map tasks, 'r' for reduce tasks.",
        },
        RESPONSE_FORMAT,
    ],
};

static GET_TASK: OperationDescriptor = OperationDescriptor {
    name: "jobhistory_get_task",
    title: "Task details",
    description: "Details of one task: type, state, progress, timing and successful attempt.",
    endpoint: Some("mapreduce/jobs/{job_id}/tasks/{task_id}"),
    params: &[JOB_ID, TASK_ID, RESPONSE_FORMAT],
};

static GET_TASK_COUNTERS: OperationDescriptor = OperationDescriptor {
    name: "jobhistory_get_task_counters",
    title: "Task counters",
    description: "Counters of one task.",
    endpoint: Some("mapreduce/jobs/{job_id}/tasks/{task_id}/counters"),
    params: &[JOB_ID, TASK_ID, RESPONSE_FORMAT],
};

static LIST_TASK_ATTEMPTS: OperationDescriptor = OperationDescriptor {
    name: "jobhistory_list_task_attempts",
    title: "List task attempts",
    description: "All attempts of a task; failed tasks are retried as new attempts.",
    endpoint: Some("mapreduce/jobs/{job_id}/tasks/{task_id}/attempts"),
    params: &[JOB_ID, TASK_ID, RESPONSE_FORMAT],
};

static GET_TASK_ATTEMPT: OperationDescriptor = OperationDescriptor {
    name: "jobhistory_get_task_attempt",
    title: "Task attempt details",
    description: "Details of one task attempt: container, node, timing and diagnostics. Reduce \
                  attempts include shuffle and merge phase times.",
    endpoint: Some("mapreduce/jobs/{job_id}/tasks/{task_id}/attempts/{attempt_id}"),
    params: &[JOB_ID, TASK_ID, ATTEMPT_ID, RESPONSE_FORMAT],
};

static GET_TASK_ATTEMPT_COUNTERS: OperationDescriptor = OperationDescriptor {
    name: "jobhistory_get_task_attempt_counters",
    title: "Task attempt counters",
    description: "Counters of one task attempt.",
    endpoint: Some("mapreduce/jobs/{job_id}/tasks/{task_id}/attempts/{attempt_id}/counters"),
    params: &[JOB_ID, TASK_ID, ATTEMPT_ID, RESPONSE_FORMAT],
};

static GET_TASK_ATTEMPT_LOGS: OperationDescriptor = OperationDescriptor {
    name: "jobhistory_get_task_attempt_logs",
    title: "Task attempt logs",
    description: "Complete container log of a task attempt. Resolves the container, node and \
                  owning user, then fetches the whole file. Large tasks can produce very large \
                  logs: prefer jobhistory_get_task_attempt_logs_partial first.",
    endpoint: None,
    params: &[JOB_ID, TASK_ID, ATTEMPT_ID, log_type("stdout"), RESPONSE_FORMAT],
};

static GET_TASK_ATTEMPT_LOGS_PARTIAL: OperationDescriptor = OperationDescriptor {
    name: "jobhistory_get_task_attempt_logs_partial",
    title: "Task attempt logs (byte range)",
    description: "Byte range of a container log. A negative `start` counts back from the end of \
                  the file (default -4096: last 4 KB, usually enough to see why a task failed) \
                  and ignores `end`. A non-negative `start` reads up to byte `end`, where 0 means \
                  end of file. Examples: start=-8192; start=0,end=2048; start=10240,end=20480.",
    endpoint: None,
    params: &[
        JOB_ID,
        TASK_ID,
        ATTEMPT_ID,
        log_type("syslog"),
        ParamSpec {
            name: "start",
            kind: ParamKind::Integer {
                min: None,
                max: None,
            },
            location: ParamLocation::Local,
            required: false,
            default: Some(ParamDefault::Int(-4096)),
            description: "Start byte. Negative counts back from the end of the file.",
        },
        ParamSpec {
            name: "end",
            kind: ParamKind::Integer {
                min: None,
                max: None,
            },
            location: ParamLocation::Local,
            required: false,
            default: Some(ParamDefault::Int(0)),
            description: "End byte; 0 means end of file, negative counts back from the end. \
                      Ignored when start is negative.",
        },
        RESPONSE_FORMAT,
    ],
};

pub(super) fn descriptor(op: Operation) -> &'static OperationDescriptor {
    match op {
        Operation::Info => &INFO,
        Operation::ListJobs => &LIST_JOBS,
        Operation::GetJob => &GET_JOB,
        Operation::GetJobCounters => &GET_JOB_COUNTERS,
        Operation::GetJobConf => &GET_JOB_CONF,
        Operation::GetJobAttempts => &GET_JOB_ATTEMPTS,
        Operation::ListTasks => &LIST_TASKS,
        Operation::GetTask => &GET_TASK,
        Operation::GetTaskCounters => &GET_TASK_COUNTERS,
        Operation::ListTaskAttempts => &LIST_TASK_ATTEMPTS,
        Operation::GetTaskAttempt => &GET_TASK_ATTEMPT,
        Operation::GetTaskAttemptCounters => &GET_TASK_ATTEMPT_COUNTERS,
        Operation::GetTaskAttemptLogs => &GET_TASK_ATTEMPT_LOGS,
        Operation::GetTaskAttemptLogsPartial => &GET_TASK_ATTEMPT_LOGS_PARTIAL,
    }
}
